//! Query-string construction for the filtered checklist view.

use crate::stats::SENTINEL_ASPEK;

/// Percent-encode one query component, `encodeURIComponent` charset.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(b as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Build the query string carried when an aspect card is clicked.
///
/// The raw (non-normalized) aspect value passes through; only when the group
/// has no usable value does the sentinel label stand in, matching how the
/// dashboard labels that group.
pub fn filtered_list_query(year: i32, aspect: Option<&str>) -> String {
    let aspect = match aspect {
        Some(a) if !a.trim().is_empty() => a,
        _ => SENTINEL_ASPEK,
    };
    format!(
        "year={year}&aspect={}&scroll=checklist",
        encode_component(aspect)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_raw_aspect_through_encoded() {
        let q = filtered_list_query(2024, Some("Aspek I: Komitmen"));
        assert_eq!(q, "year=2024&aspect=Aspek%20I%3A%20Komitmen&scroll=checklist");
    }

    #[test]
    fn blank_aspect_falls_back_to_sentinel_label() {
        let q = filtered_list_query(2024, Some("   "));
        assert_eq!(q, "year=2024&aspect=Dokumen%20Tanpa%20Aspek&scroll=checklist");
        assert_eq!(filtered_list_query(2024, None), q);
    }

    #[test]
    fn non_ascii_is_utf8_percent_encoded() {
        assert_eq!(
            filtered_list_query(2023, Some("é")),
            "year=2023&aspect=%C3%A9&scroll=checklist"
        );
    }
}
