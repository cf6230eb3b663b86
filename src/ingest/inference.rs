use once_cell::sync::Lazy;
use regex::Regex;
use crate::config::FieldDefaults;
use crate::constants::*;
use crate::ingest::record::{
    AdmissionRecord, Category, Degree, InferredEntities, Institute, InstituteType, Program,
    RawAdmissionRow, Round,
};

struct InstituteRule {
    institute_type: InstituteType,
    markers: &'static [&'static str],
    // Captures the word that follows the type marker, e.g. "Bombay".
    code_patterns: Vec<Regex>,
    coded: bool,
}

// Evaluated top to bottom. "IIIT" contains "IIT", so the more specific
// markers come first.
static INSTITUTE_RULES: Lazy<Vec<InstituteRule>> = Lazy::new(|| {
    vec![
        InstituteRule {
            institute_type: InstituteType::Iiit,
            markers: &["IIIT", "Indian Institute of Information Technology"],
            code_patterns: vec![
                Regex::new(r"(?i)IIIT\s+(\w+)").unwrap(),
                Regex::new(r"(?i)Indian\s+Institute\s+of\s+Information\s+Technology[\s,]+(\w+)").unwrap(),
            ],
            coded: true,
        },
        InstituteRule {
            institute_type: InstituteType::Iiest,
            markers: &["IIEST", "Indian Institute of Engineering Science and Technology"],
            code_patterns: Vec::new(),
            coded: false,
        },
        InstituteRule {
            institute_type: InstituteType::Iit,
            markers: &["IIT", "Indian Institute of Technology"],
            code_patterns: vec![
                Regex::new(r"(?i)IIT\s+(\w+)").unwrap(),
                Regex::new(r"(?i)Indian\s+Institute\s+of\s+Technology[\s,]+(\w+)").unwrap(),
            ],
            coded: true,
        },
        InstituteRule {
            institute_type: InstituteType::Nit,
            markers: &["NIT", "National Institute of Technology"],
            code_patterns: vec![
                Regex::new(r"(?i)NIT\s+(\w+)").unwrap(),
                Regex::new(r"(?i)National\s+Institute\s+of\s+Technology[\s,]+(\w+)").unwrap(),
            ],
            coded: true,
        },
    ]
});

const LOCATION_RULES: [(&str, &str); 10] = [
    ("Bombay", "Mumbai, Maharashtra"),
    ("Delhi", "New Delhi, Delhi"),
    ("Madras", "Chennai, Tamil Nadu"),
    ("Kanpur", "Kanpur, Uttar Pradesh"),
    ("Kharagpur", "Kharagpur, West Bengal"),
    ("Roorkee", "Roorkee, Uttarakhand"),
    ("Guwahati", "Guwahati, Assam"),
    ("Hyderabad", "Hyderabad, Telangana"),
    ("Bhubaneswar", "Bhubaneswar, Odisha"),
    ("Indore", "Indore, Madhya Pradesh"),
];

const DURATION_RULES: [&str; 4] = ["4 Years", "5 Years", "3 Years", "2 Years"];

const DEGREE_RULES: [(&str, Degree); 5] = [
    ("Bachelor of Technology", Degree::BTech),
    ("Bachelor of Science", Degree::BSc),
    ("Bachelor of Architecture", Degree::BArch),
    ("Master of Technology", Degree::MTech),
    ("Master of Science", Degree::MSc),
];

const CATEGORY_DESCRIPTIONS: [(&str, &str); 10] = [
    ("OPEN", "General Category"),
    ("EWS", "Economically Weaker Section"),
    ("OBC-NCL", "Other Backward Classes - Non Creamy Layer"),
    ("SC", "Scheduled Caste"),
    ("ST", "Scheduled Tribe"),
    ("OPEN (PwD)", "General Category - Persons with Disability"),
    ("EWS (PwD)", "EWS - Persons with Disability"),
    ("OBC-NCL (PwD)", "OBC-NCL - Persons with Disability"),
    ("SC (PwD)", "SC - Persons with Disability"),
    ("ST (PwD)", "ST - Persons with Disability"),
];

fn matching_rule(institute_name: &str) -> Option<&'static InstituteRule> {
    INSTITUTE_RULES.iter().find(|rule| {
        rule.markers
            .iter()
            .any(|marker| institute_name.contains(marker))
    })
}

pub fn institute_type(institute_name: &str) -> InstituteType {
    matching_rule(institute_name)
        .map(|rule| rule.institute_type)
        .unwrap_or(InstituteType::Gfti)
}

/// `<TYPE><first three letters of the following word>`, e.g. `IITBOM`.
/// Falls back to `<TYPE>001` when no word follows the marker, and to a fixed
/// generic code for IIEST and GFTI institutes.
pub fn institute_code(institute_name: &str) -> String {
    let rule = match matching_rule(institute_name) {
        Some(rule) if rule.coded => rule,
        _ => return GENERIC_INSTITUTE_CODE.to_string(),
    };

    let word = rule
        .code_patterns
        .iter()
        .find_map(|pattern| pattern.captures(institute_name))
        .and_then(|captures| captures.get(1))
        .map(|word| word.as_str());

    match word {
        Some(word) => {
            let prefix: String = word.chars().take(INSTITUTE_CODE_WORD_CHARS).collect();
            format!("{}{}", rule.institute_type, prefix.to_uppercase())
        }
        None => format!("{}{}", rule.institute_type, FALLBACK_INSTITUTE_SUFFIX),
    }
}

pub fn location(institute_name: &str) -> &'static str {
    LOCATION_RULES
        .iter()
        .find(|(keyword, _)| institute_name.contains(keyword))
        .map(|(_, place)| *place)
        .unwrap_or(DEFAULT_LOCATION)
}

pub fn duration(course: &str) -> &'static str {
    DURATION_RULES
        .iter()
        .find(|token| course.contains(*token))
        .copied()
        .unwrap_or(DEFAULT_DURATION)
}

pub fn degree(course: &str) -> Degree {
    DEGREE_RULES
        .iter()
        .find(|(phrase, _)| course.contains(phrase))
        .map(|(_, degree)| *degree)
        .unwrap_or(Degree::BTech)
}

/// Stable four-digit program code: the 32-bit `h * 31 + c` string hash over
/// UTF-16 code units, absolute value, first four decimal digits.
pub fn program_code(course: &str) -> String {
    let mut hash: i32 = 0;
    for unit in course.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }

    i64::from(hash)
        .abs()
        .to_string()
        .chars()
        .take(PROGRAM_CODE_LENGTH)
        .collect()
}

pub fn category_description(category: &str) -> String {
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(value, _)| *value == category)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| category.to_string())
}

/// Parses an opening/closing rank. A trailing PwD marker (`50P`) is dropped;
/// anything without leading digits parses as 0. Digit runs too long for a
/// `u64` saturate.
pub fn parse_rank(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(PWD_RANK_SUFFIX).unwrap_or(trimmed).trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Round number from the raw column. Accepts `3` as well as `Round 3` or `Round-3`.
pub fn round_number<'a>(raw: &'a str, default: &'a str) -> &'a str {
    let trimmed = raw.trim();
    let number = match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("round") => trimmed[5..]
            .trim_start_matches(|c: char| c == '-' || c == '_' || c.is_whitespace()),
        _ => trimmed,
    };

    if number.is_empty() {
        default
    } else {
        number
    }
}

/// Derives the normalized entities for one valid row. The record's rank is
/// left at 0 until the merge engine assigns it.
pub fn infer_row(row: &RawAdmissionRow, defaults: &FieldDefaults) -> InferredEntities {
    let institute_name = row.get(COLUMN_COLLEGE).to_string();
    let course = row.get(COLUMN_COURSE).to_string();
    let year = row.get_or(COLUMN_YEAR, &defaults.year).to_string();
    let category = row.get_or(COLUMN_SEAT_TYPE, &defaults.category).to_string();
    let round = round_number(row.get(COLUMN_ROUND), &defaults.round).to_string();

    let institute_type = institute_type(&institute_name);
    let institute_code = institute_code(&institute_name);
    let location = location(&institute_name).to_string();
    let duration = duration(&course).to_string();

    let record = AdmissionRecord {
        rank: 0,
        year: year.clone(),
        round: format!("{}{}", ROUND_VALUE_PREFIX, round),
        institute_name: institute_name.clone(),
        institute_code: institute_code.clone(),
        location: location.clone(),
        institute_type,
        branch: course.clone(),
        duration: duration.clone(),
        category: category.clone(),
        gender: row.get_or(COLUMN_GENDER, &defaults.gender).to_string(),
        opening_rank: parse_rank(row.get(COLUMN_OPENING_RANK)),
        closing_rank: parse_rank(row.get(COLUMN_CLOSING_RANK)),
        quota: row.get_or(COLUMN_QUOTA, &defaults.quota).to_string(),
    };

    InferredEntities {
        institute: Institute {
            code: institute_code,
            label: institute_name,
            institute_type,
            location,
        },
        program: Program {
            code: program_code(&course),
            degree: degree(&course),
            label: course,
            duration,
        },
        category: Category {
            value: category.clone(),
            label: category.clone(),
            description: category_description(&category),
        },
        round: Round {
            value: record.round.clone(),
            label: format!("{}{}", ROUND_LABEL_PREFIX, round),
            year,
            status: ROUND_STATUS_COMPLETED.to_string(),
        },
        record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::tokenizer::parse_csv_line;

    const CSE: &str = "Computer Science and Engineering (4 Years, Bachelor of Technology)";

    #[test]
    fn test_institute_type_rules() {
        let cases = vec![
            ("IIT Bombay", InstituteType::Iit),
            ("Indian Institute of Technology Madras", InstituteType::Iit),
            ("IIIT Hyderabad", InstituteType::Iiit),
            ("Indian Institute of Information Technology Guwahati", InstituteType::Iiit),
            ("NIT Trichy", InstituteType::Nit),
            ("National Institute of Technology Calicut", InstituteType::Nit),
            ("IIEST Shibpur", InstituteType::Iiest),
            ("Birla Institute of Technology, Mesra", InstituteType::Gfti),
        ];

        for (name, expected) in cases {
            assert_eq!(institute_type(name), expected, "Failed for input: {}", name);
        }
    }

    #[test]
    fn test_institute_codes() {
        let cases = vec![
            ("IIT Bombay", "IITBOM"),
            ("Indian Institute of Technology Bombay", "IITBOM"),
            ("iit kanpur campus IIT", "IITKAN"),
            ("IIIT Hyderabad", "IIITHYD"),
            ("NIT Warangal", "NITWAR"),
            ("National Institute of Technology, Tiruchirappalli", "NITTIR"),
            ("Indian Institute of Technology (BHU) Varanasi", "IIT001"),
            ("IIEST Shibpur", "INST001"),
            ("Punjab Engineering College", "INST001"),
        ];

        for (name, expected) in cases {
            assert_eq!(institute_code(name), expected, "Failed for input: {}", name);
        }
    }

    #[test]
    fn test_location_first_match_wins() {
        assert_eq!(location("Indian Institute of Technology Bombay"), "Mumbai, Maharashtra");
        assert_eq!(location("IIIT Delhi"), "New Delhi, Delhi");
        assert_eq!(location("IIT Hyderabad"), "Hyderabad, Telangana");
        assert_eq!(location("NIT Surathkal"), "India");
    }

    #[test]
    fn test_duration_and_degree() {
        assert_eq!(duration(CSE), "4 Years");
        assert_eq!(duration("Architecture (5 Years, Bachelor of Architecture)"), "5 Years");
        assert_eq!(duration("Mathematics"), "4 Years");

        assert_eq!(degree(CSE), Degree::BTech);
        assert_eq!(degree("Architecture (5 Years, Bachelor of Architecture)"), Degree::BArch);
        assert_eq!(degree("Physics (4 Years, Bachelor of Science)"), Degree::BSc);
        assert_eq!(degree("Data Science (2 Years, Master of Technology)"), Degree::MTech);
        assert_eq!(degree("Chemistry (2 Years, Master of Science)"), Degree::MSc);
        assert_eq!(degree("Something else"), Degree::BTech);
    }

    #[test]
    fn test_program_code_is_stable() {
        assert_eq!(program_code("a"), "97");
        assert_eq!(program_code("ab"), "3105");
        assert_eq!(program_code(CSE), "3965");
        assert_eq!(program_code("Architecture (5 Years, Bachelor of Architecture)"), "2948");
        assert_eq!(program_code(""), "0");
        assert_eq!(program_code(CSE), program_code(CSE));
    }

    #[test]
    fn test_category_descriptions() {
        assert_eq!(category_description("OPEN"), "General Category");
        assert_eq!(
            category_description("OBC-NCL (PwD)"),
            "OBC-NCL - Persons with Disability"
        );
        assert_eq!(category_description("Female Supernumerary"), "Female Supernumerary");
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank("50P"), 50);
        assert_eq!(parse_rank(" 6467 "), 6467);
        assert_eq!(parse_rank("12.0"), 12);
        assert_eq!(parse_rank(""), 0);
        assert_eq!(parse_rank("n/a"), 0);
        assert_eq!(parse_rank("-3"), 0);
    }

    #[test]
    fn test_parse_rank_large_values() {
        assert_eq!(parse_rank("5000000000"), 5_000_000_000);
        assert_eq!(parse_rank("5000000000P"), 5_000_000_000);
        assert_eq!(parse_rank("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_round_number() {
        assert_eq!(round_number("3", "1"), "3");
        assert_eq!(round_number("", "1"), "1");
        assert_eq!(round_number("Round-2", "1"), "2");
        assert_eq!(round_number("round 6", "1"), "6");
    }

    #[test]
    fn test_infer_row() {
        let headers = parse_csv_line("Year,Round,College,Couse,Quota,Seat Type,Gender,Opening Rank,Closing Rank");
        let values = parse_csv_line(&format!(
            r#"2024,1,Indian Institute of Technology Bombay,"{}",AI,OPEN,Gender-Neutral,1,63"#,
            CSE
        ));
        let row = RawAdmissionRow::from_fields(&headers, values);
        let inferred = infer_row(&row, &FieldDefaults::default());

        assert_eq!(inferred.record.round, "Round-1");
        assert_eq!(inferred.record.institute_code, "IITBOM");
        assert_eq!(inferred.record.institute_type, InstituteType::Iit);
        assert_eq!(inferred.record.location, "Mumbai, Maharashtra");
        assert_eq!(inferred.record.opening_rank, 1);
        assert_eq!(inferred.record.closing_rank, 63);
        assert_eq!(inferred.program.code, "3965");
        assert_eq!(inferred.program.degree, Degree::BTech);
        assert_eq!(inferred.round.label, "Round 1");
        assert_eq!(inferred.round.status, "Completed");
        assert_eq!(inferred.category.description, "General Category");
    }

    #[test]
    fn test_infer_row_defaults() {
        let headers = parse_csv_line("Year,Round,College,Couse,Quota,Seat Type,Gender,Opening Rank,Closing Rank");
        let values = parse_csv_line(",,NIT Warangal,Civil Engineering,,,,10P,20");
        let row = RawAdmissionRow::from_fields(&headers, values);
        let inferred = infer_row(&row, &FieldDefaults::default());

        assert_eq!(inferred.record.year, "2025");
        assert_eq!(inferred.record.round, "Round-1");
        assert_eq!(inferred.record.quota, "AI");
        assert_eq!(inferred.record.gender, "Gender-Neutral");
        assert_eq!(inferred.record.category, "OPEN");
        assert_eq!(inferred.record.opening_rank, 10);
        assert_eq!(inferred.round.year, "2025");
    }
}
