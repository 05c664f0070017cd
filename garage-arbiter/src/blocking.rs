//! Driving enter futures on a plain OS thread.

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

/// Wakes a parked thread.
struct ThreadWaker(Thread);

impl Wake for ThreadWaker {
    fn wake(self: Arc<Self>) {
        self.0.unpark();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.unpark();
    }
}

fn current_thread_waker() -> Waker {
    Waker::from(Arc::new(ThreadWaker(thread::current())))
}

/// Run `future` to completion on the current thread.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    let mut future = pin!(future);
    let waker = current_thread_waker();
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
        // Spurious unparks just cost one extra poll.
        thread::park();
    }
}

/// Run `future` on the current thread for at most `timeout`.
///
/// On expiry the future is dropped, which is how an enter future withdraws
/// from its queue.
pub(crate) fn block_on_timeout<F: Future>(future: F, timeout: Duration) -> Option<F::Output> {
    let Some(deadline) = Instant::now().checked_add(timeout) else {
        return Some(block_on(future));
    };

    let mut future = pin!(future);
    let waker = current_thread_waker();
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return Some(output);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        thread::park_timeout(deadline - now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_block_on_ready() {
        assert_eq!(block_on(async { 7 }), 7);
    }

    #[test]
    fn test_block_on_timeout_expires() {
        let started = Instant::now();
        let result = block_on_timeout(std::future::pending::<()>(), Duration::from_millis(20));
        assert!(result.is_none());
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_block_on_is_woken_from_another_thread() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = Arc::clone(&flag);

        let future = std::future::poll_fn(move |cx| {
            if flag_clone.load(Ordering::SeqCst) {
                return Poll::Ready("woken");
            }
            let waker = cx.waker().clone();
            let flag = Arc::clone(&flag_clone);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(5));
                flag.store(true, Ordering::SeqCst);
                waker.wake();
            });
            Poll::Pending
        });

        assert_eq!(block_on(future), "woken");
        assert!(flag.load(Ordering::SeqCst));
    }
}
