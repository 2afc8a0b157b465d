//! Running a suspendable computation against a synchronous callback.
//!
//! A [`Suspended`] value is a computation paused on a request. Answering the
//! request with [`Suspended::resume`] either pauses it again on the next
//! request or finishes it. [`drive`] turns that pull-based protocol into a
//! plain callback: the oracle is called exactly once per request, in the
//! order the requests are made, and the final output is returned.

use std::fmt;

/// One step of a suspendable computation.
pub enum Step<S: Suspended> {
    /// Paused on `S::request()`, waiting for an answer.
    Yield(S),
    /// Finished.
    Return(S::Output),
}

impl<S> fmt::Debug for Step<S>
where
    S: Suspended + fmt::Debug,
    S::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Yield(pending) => f.debug_tuple("Yield").field(pending).finish(),
            Step::Return(output) => f.debug_tuple("Return").field(output).finish(),
        }
    }
}

/// A computation paused on a request.
pub trait Suspended: Sized {
    type Request;
    type Response;
    type Output;
    type Error;

    /// The request this computation is waiting on.
    fn request(&self) -> &Self::Request;

    /// Answer the pending request and run until the next one.
    fn resume(self, response: Self::Response) -> Result<Step<Self>, Self::Error>;
}

/// Run `step` to completion, answering every request with `oracle`.
pub fn drive<S, F>(step: Step<S>, mut oracle: F) -> Result<S::Output, S::Error>
where
    S: Suspended,
    F: FnMut(&S::Request) -> S::Response,
{
    let mut step = step;
    loop {
        match step {
            Step::Return(output) => return Ok(output),
            Step::Yield(pending) => {
                let response = oracle(pending.request());
                step = pending.resume(response)?;
            }
        }
    }
}
