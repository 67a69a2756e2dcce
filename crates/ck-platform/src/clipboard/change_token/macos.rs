use cocoa::appkit::NSPasteboard;
use cocoa::base::nil;
use objc::runtime::Object;
use objc::{msg_send, sel, sel_impl};

/// `NSPasteboard.generalPasteboard.changeCount`, a plain integer read.
pub(super) fn pasteboard_change_count() -> Option<u64> {
    unsafe {
        let pasteboard: *mut Object = NSPasteboard::generalPasteboard(nil);
        if pasteboard.is_null() {
            return None;
        }
        // NSInteger
        let change_count: i64 = msg_send![pasteboard, changeCount];
        u64::try_from(change_count).ok()
    }
}
