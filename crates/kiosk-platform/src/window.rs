/// Host window lifecycle, as far as handlers need it.
///
/// `APP CLOSE` tears the window down and deliberately produces no response;
/// the content view is gone before one could arrive.
pub trait WindowControl: Send + Sync {
    fn close(&self);
}
