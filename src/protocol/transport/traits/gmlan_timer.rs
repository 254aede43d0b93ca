//! Asynchronous timer abstraction used to pace consecutive segments.

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait GmlanTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}
