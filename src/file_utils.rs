use mime::Mime;

pub fn guess_mime_type(filename: &str) -> Mime {
    mime_guess::from_path(filename).first_or_octet_stream()
}

/// Matches a concrete MIME type against an allowed-type entry. Entries may
/// be exact (`image/png`) or wildcards (`image/*`, `*/*`); parameters such
/// as `charset` are ignored on both sides.
pub fn mime_matches(pattern: &str, candidate: &Mime) -> bool {
    let pattern: Mime = match pattern.trim().parse() {
        Ok(p) => p,
        Err(_) => return false,
    };
    if pattern.type_() == mime::STAR {
        return true;
    }
    if pattern.type_() != candidate.type_() {
        return false;
    }
    pattern.subtype() == mime::STAR || pattern.subtype() == candidate.subtype()
}

pub fn is_mime_allowed(allowed: &[String], candidate: &Mime) -> bool {
    allowed.is_empty() || allowed.iter().any(|p| mime_matches(p, candidate))
}

pub fn extract_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

pub fn is_extension_allowed(allowed: &[String], filename: &str) -> bool {
    if allowed.is_empty() {
        return true;
    }
    match extract_extension(filename) {
        Some(ext) => allowed
            .iter()
            .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&ext)),
        None => false,
    }
}
