pub mod mock_document;

use autofmt_mini::Session;
use self::mock_document::MockDocument;

/// Drive a session the way a rendering layer would: offer each character to
/// the engine first, insert it only when the engine did not consume it.
pub fn type_str(session: &mut Session<MockDocument>, input: &str) {
    for ch in input.chars() {
        if !session.handle_before_input(ch).is_handled() {
            session.document_mut().insert_char(ch);
        }
    }
}
