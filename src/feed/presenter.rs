use crate::errors::ClientError;
use super::diff::Patch;
use super::render::Page;

/// Output boundary of the feed controller
pub trait Presenter {
    /// Called after every render that changed the page
    fn apply(&mut self, page: &Page, patches: &[Patch]);

    /// Blocking notification with server reply
    fn alert(&mut self, message: &str);

    /// The only place where operation errors reach the user
    fn report(&mut self, error: &ClientError);
}
