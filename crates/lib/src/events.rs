//! Typed publish/subscribe channels for execution lifecycle notifications.
//!
//! A channel is parameterised by its handler signature (for example
//! `dyn Fn(&Step)`). Handlers are identified by the [`SubscriptionId`] handed
//! out at subscription time, never by function identity.

use std::fmt;

/// Handle used to detach a handler from the channel it was subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A synchronous fan-out channel.
///
/// Publishing calls every current handler, in subscription order, on the
/// caller's thread. There is no queueing; a panicking handler unwinds into
/// the publisher.
pub struct EventChannel<F: ?Sized> {
  next_id: u64,
  handlers: Vec<(SubscriptionId, Box<F>)>,
}

impl<F: ?Sized> Default for EventChannel<F> {
  fn default() -> Self {
    Self {
      next_id: 0,
      handlers: Vec::new(),
    }
  }
}

impl<F: ?Sized> EventChannel<F> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn subscribe(&mut self, handler: Box<F>) -> SubscriptionId {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.handlers.push((id, handler));
    id
  }

  /// Detach a handler. Returns `false` if the id was not subscribed.
  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let before = self.handlers.len();
    self.handlers.retain(|(handler_id, _)| *handler_id != id);
    self.handlers.len() != before
  }

  /// Invoke `deliver` once per handler, in subscription order.
  ///
  /// Returns whether anybody was listening.
  pub fn publish(&self, mut deliver: impl FnMut(&F)) -> bool {
    for (_, handler) in &self.handlers {
      deliver(handler.as_ref());
    }
    !self.handlers.is_empty()
  }

  pub fn subscriber_count(&self) -> usize {
    self.handlers.len()
  }
}

impl<F: ?Sized> fmt::Debug for EventChannel<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EventChannel")
      .field("subscribers", &self.handlers.len())
      .finish()
  }
}
