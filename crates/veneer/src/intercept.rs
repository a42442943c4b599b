//! Interception Engine
//!
//! Composes caller-supplied behaviors around a member's original logic.
//! The engine guarantees ordering and pass-through of arguments, return
//! value, receiver binding, and raised errors; what each behavior does
//! with them is opaque here.
//!
//! Wrapping order follows definition-time application order: the first
//! behavior applied becomes the innermost wrapper (runs closest to the
//! original logic), each later behavior wraps the previous result and
//! becomes the new outermost layer. A wrapped member holds no state
//! between calls; any persistent state lives in behavior closures.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::member::{CallContext, CallResult, Callable};
use crate::registry::MemberRegistry;
use crate::value::Value;

/// A wrapping step: given the callable underneath, produce the new layer
pub type Behavior = Box<dyn Fn(Callable) -> Callable + Send + Sync>;

/// Ordered sequence of behaviors closed over one member's original logic.
///
/// Layers are applied in push order, so the first layer pushed ends up
/// innermost.
#[derive(Default)]
pub struct BehaviorChain {
    layers: Vec<Behavior>,
}

impl BehaviorChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a behavior as the new outermost layer
    pub fn push<B>(&mut self, behavior: B)
    where
        B: Fn(Callable) -> Callable + Send + Sync + 'static,
    {
        self.layers.push(Box::new(behavior));
    }

    /// Wrap an original callable with every layer in the chain
    pub fn wrap(&self, original: Callable) -> Callable {
        self.layers.iter().fold(original, |inner, layer| layer(inner))
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check whether the chain has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Build a behavior from pre/post hooks.
///
/// The produced layer runs `pre`, invokes the wrapped callable with the
/// same context and arguments, runs `post` with the outcome, and returns
/// the outcome unchanged. Errors raised underneath pass through; `post`
/// observes them but cannot swallow them.
pub fn around<Pre, Post>(pre: Pre, post: Post) -> impl Fn(Callable) -> Callable + Send + Sync + 'static
where
    Pre: Fn(&CallContext, &[Value]) + Send + Sync + 'static,
    Post: Fn(&CallContext, &CallResult) + Send + Sync + 'static,
{
    let pre = Arc::new(pre);
    let post = Arc::new(post);
    move |inner: Callable| {
        let pre = pre.clone();
        let post = post.clone();
        Arc::new(move |cx: &CallContext, args: &[Value]| {
            pre(cx, args);
            let outcome = inner(cx, args);
            post(cx, &outcome);
            outcome
        }) as Callable
    }
}

/// Build a behavior that only has pre-logic
pub fn before<Pre>(pre: Pre) -> impl Fn(Callable) -> Callable + Send + Sync + 'static
where
    Pre: Fn(&CallContext, &[Value]) + Send + Sync + 'static,
{
    around(pre, |_, _| {})
}

/// Invoke a member through its current descriptor.
///
/// Resolves the descriptor at call time, so a decorator-installed wrapper
/// chain is what actually runs. Fails with [`Error::MemberNotFound`] for
/// undeclared members and [`Error::NotCallable`] for data fields; errors
/// raised by the member itself surface as [`Error::Invocation`].
pub fn invoke(
    registry: &MemberRegistry,
    cx: &CallContext,
    args: &[Value],
) -> Result<Value> {
    let descriptor = registry.descriptor(cx.target, &cx.member)?;
    let body = descriptor
        .value
        .as_callable()
        .ok_or_else(|| Error::NotCallable {
            target: cx.target,
            name: cx.member.clone(),
        })?;
    Ok(body(cx, args)?)
}

// ----------------------------------------------------------------------------
// Async members
// ----------------------------------------------------------------------------

/// Outcome of an asynchronous member call
pub type FutureOutcome = Pin<Box<dyn Future<Output = CallResult> + Send>>;

/// An invocable asynchronous member body or behavior layer
pub type AsyncCallable = Arc<dyn Fn(CallContext, Vec<Value>) -> FutureOutcome + Send + Sync>;

/// Wrap a closure as an [`AsyncCallable`]
pub fn async_callable<F, Fut>(f: F) -> AsyncCallable
where
    F: Fn(CallContext, Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallResult> + Send + 'static,
{
    Arc::new(move |cx, args| Box::pin(f(cx, args)))
}

/// Wrap an asynchronous callable with pre/post hooks.
///
/// `pre` runs synchronously, before the inner future is constructed, so it
/// precedes the first suspension point; `post` runs after the inner future
/// resolves, with the outcome, which is then returned unchanged. This
/// preserves the "runs around" contract across suspension.
pub fn wrap_async<Pre, Post>(inner: AsyncCallable, pre: Pre, post: Post) -> AsyncCallable
where
    Pre: Fn(&CallContext, &[Value]) + Send + Sync + 'static,
    Post: Fn(&CallContext, &CallResult) + Send + Sync + 'static,
{
    let pre = Arc::new(pre);
    let post = Arc::new(post);
    Arc::new(move |cx: CallContext, args: Vec<Value>| {
        pre(&cx, &args);
        let fut = inner(cx.clone(), args);
        let post = post.clone();
        Box::pin(async move {
            let outcome = fut.await;
            post(&cx, &outcome);
            outcome
        }) as FutureOutcome
    })
}
