//! One-shot asset futures and the all-succeed join combinator

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use macroquad::audio::Sound;
use macroquad::prelude::{Font, Texture2D};

use crate::error::{FrameworkError, Result};

/// A loaded resource of any kind, tagged with what it is
pub enum Loaded {
    Image(Texture2D),
    Sound(Sound),
    Font(Font),
}

fn load_error(reference: &str, reason: impl ToString) -> FrameworkError {
    FrameworkError::AssetLoad {
        reference: reference.to_string(),
        reason: reason.to_string(),
    }
}

/// Load an image file into a GPU texture
pub async fn load_image(path: &str) -> Result<Texture2D> {
    log::debug!("Loading image {}", path);
    macroquad::texture::load_texture(path)
        .await
        .map_err(|e| load_error(path, e))
}

/// Load a sound file (wav / ogg)
pub async fn load_sound(path: &str) -> Result<Sound> {
    log::debug!("Loading sound {}", path);
    macroquad::audio::load_sound(path)
        .await
        .map_err(|e| load_error(path, e))
}

/// Load a TTF font
pub async fn load_font(path: &str) -> Result<Font> {
    log::debug!("Loading font {}", path);
    macroquad::text::load_ttf_font(path)
        .await
        .map_err(|e| load_error(path, e))
}

enum Slot<F: Future> {
    Pending(Pin<Box<F>>),
    Done(Option<F::Output>),
}

/// Future returned by [`join_all_ok`]
pub struct JoinAllOk<F: Future> {
    slots: Vec<Slot<F>>,
}

// Child futures are boxed, so nothing inside is ever pin-projected.
impl<F: Future> Unpin for JoinAllOk<F> {}

/// Drive every future to completion, then succeed with all values (in input
/// order) or fail with the first error in input order.
///
/// Unlike a short-circuiting join, a failure does not drop its siblings:
/// loads already in flight still finish.
pub fn join_all_ok<F, T, E>(futures: impl IntoIterator<Item = F>) -> JoinAllOk<F>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    JoinAllOk {
        slots: futures.into_iter().map(|f| Slot::Pending(Box::pin(f))).collect(),
    }
}

impl<F, T, E> Future for JoinAllOk<F>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    type Output = std::result::Result<Vec<T>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let mut all_done = true;
        for slot in this.slots.iter_mut() {
            if let Slot::Pending(fut) = slot {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(out) => *slot = Slot::Done(Some(out)),
                    Poll::Pending => all_done = false,
                }
            }
        }
        if !all_done {
            return Poll::Pending;
        }

        let mut values = Vec::with_capacity(this.slots.len());
        let mut first_err = None;
        for slot in this.slots.iter_mut() {
            if let Slot::Done(out) = slot {
                match out.take() {
                    Some(Ok(v)) => values.push(v),
                    Some(Err(e)) => {
                        if first_err.is_none() {
                            first_err = Some(e);
                        }
                    }
                    None => {}
                }
            }
        }

        Poll::Ready(match first_err {
            Some(e) => Err(e),
            None => Ok(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Pending for `ticks` polls (waking itself each time), then resolves to `result`
    struct Delayed {
        ticks: u32,
        result: Option<std::result::Result<u32, String>>,
        finished: Rc<Cell<bool>>,
    }

    impl Delayed {
        fn new(ticks: u32, result: std::result::Result<u32, String>) -> (Self, Rc<Cell<bool>>) {
            let finished = Rc::new(Cell::new(false));
            let fut = Self { ticks, result: Some(result), finished: finished.clone() };
            (fut, finished)
        }
    }

    impl Future for Delayed {
        type Output = std::result::Result<u32, String>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            if self.ticks > 0 {
                self.ticks -= 1;
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            self.finished.set(true);
            Poll::Ready(self.result.take().expect("polled after completion"))
        }
    }

    #[test]
    fn test_all_succeed_keeps_input_order() {
        let (a, _) = Delayed::new(3, Ok(1));
        let (b, _) = Delayed::new(0, Ok(2));
        let (c, _) = Delayed::new(1, Ok(3));
        let out = block_on(join_all_ok(vec![a, b, c]));
        assert_eq!(out, Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_one_failure_fails_batch_without_aborting_others() {
        let (fast_fail, _) = Delayed::new(0, Err("missing.png".to_string()));
        let (slow_ok, slow_done) = Delayed::new(5, Ok(7));
        let out = block_on(join_all_ok(vec![fast_fail, slow_ok]));
        assert_eq!(out, Err("missing.png".to_string()));
        // The slower sibling still ran to completion
        assert!(slow_done.get());
    }

    #[test]
    fn test_first_error_in_input_order_wins() {
        let (a, _) = Delayed::new(4, Err("a".to_string()));
        let (b, _) = Delayed::new(0, Err("b".to_string()));
        assert_eq!(block_on(join_all_ok(vec![a, b])), Err("a".to_string()));
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let out = block_on(join_all_ok(Vec::<Delayed>::new()));
        assert_eq!(out, Ok(vec![]));
    }
}
