//! Frames of the explicit evaluation stack.

use kel_object::{ObjectRef, Value};
use smallvec::SmallVec;

/// Progress of one list evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EvalState {
    /// Resolve the head of the list.
    Initial,
    /// Evaluate `args[index..]` left to right.
    EvalArgs { index: usize },
    /// A child frame is computing `args[index]`; its result arrives in `ret`.
    ReceivingEvaluatedArg { index: usize },
    /// All arguments are evaluated; invoke the target.
    Call,
    /// A child frame (a user callable's body or an `if` branch) produces
    /// this frame's result.
    ReceivingResult,
    /// `if`: evaluate the test expression.
    IfTest,
    /// `if`: a child frame is computing the test.
    IfReceivingTest,
    /// `if`: the test is known; pick a branch.
    IfBranch { truthy: bool },
}

/// One pending list evaluation.
#[derive(Debug)]
pub(crate) struct Frame {
    pub list: ObjectRef,
    pub state: EvalState,
    /// Argument slots: copied from the list, overwritten in place with
    /// their evaluated values. The list itself is never modified.
    pub args: SmallVec<[Value; 4]>,
    /// Callable the head resolved to.
    pub target: Option<ObjectRef>,
    /// Return slot written by the most recently finished child frame.
    pub ret: Value,
}

impl Frame {
    pub fn new(list: ObjectRef) -> Self {
        Frame {
            list,
            state: EvalState::Initial,
            args: SmallVec::new(),
            target: None,
            ret: Value::Nil,
        }
    }

    /// Take the child's result, leaving `Nil` behind.
    pub fn take_ret(&mut self) -> Value {
        std::mem::take(&mut self.ret)
    }
}
