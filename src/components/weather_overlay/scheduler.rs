//! Fixed-period tick scheduling on top of browser timeouts.
//!
//! Each tick is a single-shot `setTimeout`. The next one is armed only after
//! the current tick's update and repaint have returned, so ticks never overlap.
//! [`TickGate::stop`] hands back the pending handle so it can be cleared, and
//! any tick that still fires afterwards is dropped.
//!
//! [`Ticker`] packages the gate with its self-rearming callback. Callbacks
//! that must reach themselves (or shared state) live in a [`Slot`], which is
//! emptied on teardown so the `Rc` cycle does not outlive the owner.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::warn;
use wasm_bindgen::prelude::*;

/// Browser timeout ids are always positive, so zero means "nothing pending".
const NO_TIMEOUT: i32 = 0;

/// Tracks the pending timeout and whether the ticker has been stopped.
///
/// Atomic so it can be shared with cleanup hooks that must be `Send + Sync`.
#[derive(Debug, Default)]
pub struct TickGate {
	stopped: AtomicBool,
	pending: AtomicI32,
}

impl TickGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a freshly armed timeout. Returns `false` if the gate was stopped
	/// in the meantime; the caller must then clear `handle` itself.
	pub fn arm(&self, handle: i32) -> bool {
		if self.is_stopped() {
			return false;
		}
		self.pending.store(handle, Ordering::SeqCst);
		true
	}

	/// Called when a timeout fires. Returns whether the tick should run.
	pub fn fire(&self) -> bool {
		self.pending.store(NO_TIMEOUT, Ordering::SeqCst);
		!self.is_stopped()
	}

	/// Stop ticking. Returns the pending timeout handle, if any, for clearing.
	pub fn stop(&self) -> Option<i32> {
		self.stopped.store(true, Ordering::SeqCst);
		match self.pending.swap(NO_TIMEOUT, Ordering::SeqCst) {
			NO_TIMEOUT => None,
			handle => Some(handle),
		}
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::SeqCst)
	}
}

/// Shared, clearable cell for a value that callbacks reach through clones of
/// the slot, possibly from inside the value itself.
pub struct Slot<T>(Rc<RefCell<Option<T>>>);

impl<T> Clone for Slot<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> Default for Slot<T> {
	fn default() -> Self {
		Self(Rc::new(RefCell::new(None)))
	}
}

impl<T> Slot<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `value`, returning whatever was there before.
	pub fn set(&self, value: T) -> Option<T> {
		self.0.borrow_mut().replace(value)
	}

	/// Empty the slot. Dropping the result releases every handle the value held.
	pub fn take(&self) -> Option<T> {
		self.0.borrow_mut().take()
	}

	pub fn is_empty(&self) -> bool {
		self.0.borrow().is_none()
	}

	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
		self.0.borrow().as_ref().map(f)
	}

	pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
		self.0.borrow_mut().as_mut().map(f)
	}
}

/// Arm a single-shot timeout that calls `callback` after `interval_ms`.
pub fn schedule(gate: &TickGate, callback: &Closure<dyn FnMut()>, interval_ms: u32) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let function = callback.as_ref().unchecked_ref::<js_sys::Function>();
	let timeout = i32::try_from(interval_ms).unwrap_or(i32::MAX);
	match window.set_timeout_with_callback_and_timeout_and_arguments_0(function, timeout) {
		Ok(handle) => {
			if !gate.arm(handle) {
				window.clear_timeout_with_handle(handle);
			}
		}
		Err(e) => warn!("notemood: failed to schedule tick: {:?}", e),
	}
}

/// Stop the gate and clear its pending timeout, if one is queued.
pub fn cancel(gate: &TickGate) {
	if let Some(handle) = gate.stop() {
		if let Some(window) = web_sys::window() {
			window.clear_timeout_with_handle(handle);
		}
	}
}

/// A fixed-period loop running `work` every `interval_ms` until stopped.
pub struct Ticker {
	gate: Arc<TickGate>,
	callback: Slot<Closure<dyn FnMut()>>,
}

impl Ticker {
	/// Build the loop and arm its first tick.
	pub fn start(interval_ms: u32, mut work: impl FnMut() + 'static) -> Self {
		let gate = Arc::new(TickGate::new());
		let callback: Slot<Closure<dyn FnMut()>> = Slot::new();
		let (gate_inner, callback_inner) = (gate.clone(), callback.clone());
		callback.set(Closure::new(move || {
			if !gate_inner.fire() {
				return;
			}
			work();
			// Re-arm only after this tick's work is done.
			callback_inner.with(|cb| schedule(&gate_inner, cb, interval_ms));
		}));
		callback.with(|cb| schedule(&gate, cb, interval_ms));
		Self { gate, callback }
	}

	/// Clear the pending timeout and drop the callback, breaking its self-reference.
	///
	/// Must not be called from inside `work`.
	pub fn stop(&self) {
		cancel(&self.gate);
		self.callback.take();
	}
}
