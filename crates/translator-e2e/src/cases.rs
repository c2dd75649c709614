//! Declarative test case tables.
//!
//! The only persisted "configuration" of these suites: flat lists of
//! {id, description, input, expected} tuples. Positive cases assert
//! containment (the page may render surrounding chrome); negative cases
//! assert the exact transliteration the site produces for unrecognized
//! input.

use pariksha::{Expectation, TranslationCase};

/// Positive functional cases: well-formed Singlish that the site translates
#[must_use]
pub fn positive_cases() -> Vec<TranslationCase> {
    vec![
        TranslationCase::new(
            "Pos_Fun_0001",
            "Convert short daily greeting",
            "suba udhaeesanak",
            Expectation::contains("සුබ උදෑසනක්"),
        ),
        TranslationCase::new(
            "Pos_Fun_0002",
            "Convert mixed Singlish + English text",
            "api heta Kandy yanna hadhanavaa, train reservation ekak kalin karanna oone machan. \
             Hotel booking ekak Booking.com eken karagamu, WiFi saha parking thiyenavaa.",
            Expectation::contains_all(["අපි හෙට Kandy යන්න හදනවා", "train reservation", "WiFi"]),
        ),
        TranslationCase::new(
            "Pos_Fun_0003",
            "Convert short request phrase",
            "karuNaakara vathura ekak dhenna",
            Expectation::contains("කරුණාකර වතුර එකක් දෙන්න"),
        ),
        TranslationCase::new(
            "Pos_Fun_0004",
            "Simple sentence with proper spacing",
            "mama gedhara yanavaa.",
            Expectation::contains("මම ගෙදර යනවා."),
        ),
        TranslationCase::new(
            "Pos_Fun_0005",
            "Joined words without spaces",
            "mamagedharayanavaa",
            Expectation::contains("මමගෙදරයනවා"),
        ),
        TranslationCase::new(
            "Pos_Fun_0006",
            "Compound sentence",
            "mama gedhara yanavaa, haebaeyi vahina nisaa dhaenma yannee naee.",
            Expectation::contains("මම ගෙදර යනවා, හැබැයි වහින නිසා දැන්ම යන්නේ නෑ."),
        ),
        TranslationCase::new(
            "Pos_Fun_0007",
            "Complex sentence with condition",
            "oya enavaanam mama balan innavaa.",
            Expectation::contains("ඔය එනවානම් මම බලන් ඉන්නවා."),
        ),
        TranslationCase::new(
            "Pos_Fun_0008",
            "Imperative command",
            "vahaama enna.",
            Expectation::contains("වහාම එන්න."),
        ),
        TranslationCase::new(
            "Pos_Fun_0009",
            "Negative sentence form",
            "mama ehema karannee naehae.",
            Expectation::contains("මම එහෙම කරන්නේ නැහැ."),
        ),
        TranslationCase::new(
            "Pos_Fun_0010",
            "Greeting phrase with exclamation",
            "aayuboovan!",
            Expectation::contains("ආයුබෝවන්!"),
        ),
        TranslationCase::new(
            "Pos_Fun_0011",
            "Polite request",
            "karuNaakaralaa mata podi udhavvak karanna puLuvandha?",
            Expectation::contains("කරුණාකරලා මට පොඩි උදව්වක් කරන්න පුළුවන්ද?"),
        ),
        TranslationCase::new(
            "Pos_Fun_0012",
            "Informal phrasing",
            "eeyi, ooka dhiyan.",
            Expectation::contains("ඒයි, ඕක දියන්."),
        ),
        TranslationCase::new(
            "Pos_Fun_0013",
            "Day-to-day expression",
            "mata nidhimathayi.",
            Expectation::contains("මට නිදිමතයි."),
        ),
        TranslationCase::new(
            "Pos_Fun_0014",
            "Multi-word expression",
            "mata oona",
            Expectation::contains("මට ඕන"),
        ),
        TranslationCase::new(
            "Pos_Fun_0015",
            "Repeated words for emphasis",
            "hari hari",
            Expectation::contains("හරි හරි"),
        ),
        TranslationCase::new(
            "Pos_Fun_0016",
            "Past tense sentence",
            "mama iiyee gedhara giyaa.",
            Expectation::contains("මම ඊයේ ගෙදර ගියා."),
        ),
        TranslationCase::new(
            "Pos_Fun_0017",
            "Future tense sentence",
            "mama heta enavaa",
            Expectation::contains("මම හෙට එනවා"),
        ),
        TranslationCase::new(
            "Pos_Fun_0018",
            "Singular pronoun usage",
            "mama yanna hadhannee.",
            Expectation::contains("මම යන්න හදන්නේ."),
        ),
        TranslationCase::new(
            "Pos_Fun_0019",
            "Plural pronoun usage",
            "api yamu.",
            Expectation::contains("අපි යමු."),
        ),
        TranslationCase::new(
            "Pos_Fun_0020",
            "Request with varying politeness",
            "karuNaakara eeka mata adha dhenavadha?",
            Expectation::contains("කරුණාකර ඒක මට අද දෙනවද?"),
        ),
        TranslationCase::new(
            "Pos_Fun_0021",
            "English technical term embedded",
            "Zoom meeting ekak thiyennee.",
            Expectation::contains("Zoom meeting එකක් තියෙන්නේ."),
        ),
        TranslationCase::new(
            "Pos_Fun_0022",
            "Place name in sentence",
            "siiyaa Colombo yanna hadhannee.",
            Expectation::contains("සීයා Colombo යන්න හදන්නේ."),
        ),
        TranslationCase::new(
            "Pos_Fun_0023",
            "English abbreviation",
            "ID eka genna",
            Expectation::contains("ID එක ගෙන්න"),
        ),
        TranslationCase::new(
            "Pos_Fun_0024",
            "Short sentence with English abbreviation",
            "OTP eka SMS ekak evanna",
            Expectation::contains("OTP එක SMS එකක් එවන්න"),
        ),
    ]
}

/// Negative functional cases: shorthand, typos, and noise the site
/// transliterates verbatim instead of translating
#[must_use]
pub fn negative_cases() -> Vec<TranslationCase> {
    vec![
        TranslationCase::new(
            "Neg_Fun_0001",
            "Chat-style shorthand \"Thx\" not converted",
            "Thx machan!",
            Expectation::exact("ථx මචන්!"),
        ),
        TranslationCase::new(
            "Neg_Fun_0002",
            "English short form \"u\" instead of \"you\"",
            "u enne?",
            Expectation::exact("උ එන්නෙ?"),
        ),
        TranslationCase::new(
            "Neg_Fun_0003",
            "Numeric shorthand \"gr8\" for \"great\"",
            "eeka gr8!",
            Expectation::exact("ඒක gr8!"),
        ),
        TranslationCase::new(
            "Neg_Fun_0004",
            "Mixed case Singlish input",
            "OyaaTa KohoMadha?",
            Expectation::exact("ඔයාඨ ඛොහොමද?"),
        ),
        TranslationCase::new(
            "Neg_Fun_0005",
            "Misspelled common Singlish phrase",
            "oyata komada?",
            Expectation::exact("ඔයට කොමඩ?"),
        ),
        TranslationCase::new(
            "Neg_Fun_0006",
            "Shorthand with trailing noise",
            "thxzzz bro",
            Expectation::exact("තxzzz bro"),
        ),
        TranslationCase::new(
            "Neg_Fun_0007",
            "Excessive character repetition",
            "haiiiiii",
            Expectation::exact("හෛඊඊඉ"),
        ),
        TranslationCase::new(
            "Neg_Fun_0008",
            "Incomplete Singlish word",
            "karann puLuvan",
            Expectation::exact("කරන්න් පුළුවන්"),
        ),
        TranslationCase::new(
            "Neg_Fun_0009",
            "Mixed language gibberish",
            "hello machan kohomada thing stuff work please thanks",
            Expectation::exact("hello මචන් කොහොමඩ thing stuff work please thanks"),
        ),
        TranslationCase::new(
            "Neg_Fun_0010",
            "Extremely long joined word stress test",
            "hello kohomada oyata enne monawada mama yanne na enna epa oyata dhanne na epa \
             hariyata yanna epa",
            Expectation::exact(
                "hello කොහොමඩ ඔයට එන්නෙ මොනwඅඩ මම යන්නෙ න එන්න එප ඔයට දන්නෙ න එප හරියට යන්න එප",
            ),
        ),
    ]
}

/// Look up a positive case by id
///
/// # Panics
///
/// Panics when the id is unknown; suite tables and tests move together.
#[must_use]
pub fn positive(id: &str) -> TranslationCase {
    positive_cases()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("unknown positive case {id}"))
}

/// Look up a negative case by id
///
/// # Panics
///
/// Panics when the id is unknown; suite tables and tests move together.
#[must_use]
pub fn negative(id: &str) -> TranslationCase {
    negative_cases()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("unknown negative case {id}"))
}
