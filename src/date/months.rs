//! Month-name tables, keyed by the locale name as printed on the page

/// Indonesian month names and their English equivalents
///
/// Entries whose names coincide (April, September, November) are kept so the
/// table always lists all twelve months.
pub static INDONESIAN: &[(&str, &str)] = &[
    ("Januari", "January"),
    ("Februari", "February"),
    ("Maret", "March"),
    ("April", "April"),
    ("Mei", "May"),
    ("Juni", "June"),
    ("Juli", "July"),
    ("Agustus", "August"),
    ("September", "September"),
    ("Oktober", "October"),
    ("November", "November"),
    ("Desember", "December"),
];
