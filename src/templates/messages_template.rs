use askama::Template;

use crate::models::Message;

#[derive(Template)]
#[template(path = "_messages.html")]
pub struct MessagesTemplate<'a> {
    pub messages: &'a [Message],
}
