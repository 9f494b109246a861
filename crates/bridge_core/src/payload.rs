/// Identifier a clipboard watcher looks for to recognise an extracted prompt.
pub const PAYLOAD_IDENTIFIER: &str = "[BRIDGIRON_GPT2CC]";

/// Prefixes `text` with the identifier line.
pub fn tag_payload(text: &str) -> String {
    format!("{PAYLOAD_IDENTIFIER}\n{text}")
}

/// Strips the identifier and the line break after it.
///
/// This crate only produces payloads; this is the reading half for the
/// clipboard watcher that consumes them.
///
/// Returns `None` for untagged input or when nothing follows the identifier.
pub fn untag_payload(clipboard: &str) -> Option<&str> {
    let rest = clipboard
        .strip_prefix(PAYLOAD_IDENTIFIER)?
        .trim_start_matches(['\r', '\n']);
    (!rest.is_empty()).then_some(rest)
}
