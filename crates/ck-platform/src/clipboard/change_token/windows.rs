use winapi::um::winuser::GetClipboardSequenceNumber;

/// The clipboard sequence number; zero means the caller has no clipboard
/// access (e.g. a service session), in which case fingerprints take over.
pub(super) fn clipboard_sequence_number() -> Option<u64> {
    match unsafe { GetClipboardSequenceNumber() } {
        0 => None,
        sequence => Some(u64::from(sequence)),
    }
}
