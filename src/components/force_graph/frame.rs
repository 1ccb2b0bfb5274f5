//! Owned `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;

struct LoopInner {
	running: Cell<bool>,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopInner {
	fn schedule(&self) {
		if !self.running.get() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => self.handle.set(Some(handle)),
			Err(err) => {
				warn!("requestAnimationFrame failed: {err:?}");
				self.running.set(false);
			}
		}
	}

	fn cancel(&self) {
		self.running.set(false);
		if let Some(handle) = self.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
	}
}

/// Calls a frame body once per display refresh until stopped or dropped.
pub struct AnimationLoop {
	inner: Rc<LoopInner>,
}

impl AnimationLoop {
	/// Start calling `frame` on every animation frame.
	pub fn start(mut frame: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(LoopInner {
			running: Cell::new(true),
			handle: Cell::new(None),
			callback: RefCell::new(None),
		});
		let weak: Weak<LoopInner> = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			if !inner.running.get() {
				return;
			}
			frame();
			inner.schedule();
		}));
		inner.schedule();
		Self { inner }
	}

	/// Whether frames are still being scheduled.
	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	/// Cancel the pending frame. Idempotent.
	pub fn stop(&self) {
		self.inner.cancel();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
