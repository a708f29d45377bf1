// VisualizationController - step-by-step execution of a staged operation
//
// Holds at most one staged composite at a time, bound to the structure it
// will mutate. The shell stages an operation, starts stepping, and calls
// step() once per click; each call executes exactly one atomic operation.
// When the last step has run, the finished composite is handed to the
// OperationManager with already_executed set, so the manager records it
// without running the steps a second time.

use crate::manager::OperationManager;
use crate::operation::atomic::AtomicOp;
use crate::operation::UserOperation;
use crate::structure::{StructureId, StructureRegistry};

/// Controller phase. Stepping is entered only from Staged, and stepping
/// is strictly forward: there is no step-back, and no cancel once the
/// first step has mutated the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Staged,
    Stepping,
}

/// What a step() call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Executed one atomic operation; more remain
    Advanced,
    /// Executed the final atomic operation (or the composite was empty)
    /// and handed the composite to the manager
    Completed,
    /// Nothing staged, or stepping has not been started
    NotStepping,
}

#[derive(Debug)]
struct StagedOperation {
    operation: UserOperation,
    structure: StructureId,
    cursor: usize,
    stepping: bool,
}

/// Stages one composite operation and steps through its atomic steps
#[derive(Debug, Default)]
pub struct VisualizationController {
    staged: Option<StagedOperation>,
}

impl VisualizationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an operation for step-by-step execution
    ///
    /// Replaces any previously staged operation. The replaced composite
    /// had not executed anything, so no structure mutation is lost.
    pub fn stage_operation(&mut self, operation: UserOperation, structure: StructureId) {
        self.staged = Some(StagedOperation {
            operation,
            structure,
            cursor: 0,
            stepping: false,
        });
    }

    /// Begin stepping. No atomic operation executes until the first
    /// step() call. Returns false unless a not-yet-started operation is
    /// staged.
    pub fn start(&mut self) -> bool {
        match self.staged.as_mut() {
            Some(staged) if !staged.stepping => {
                staged.stepping = true;
                true
            }
            _ => false,
        }
    }

    /// Execute the atomic operation at the cursor and advance
    ///
    /// On the terminal step the composite moves into the manager's
    /// history and the controller returns to Idle.
    ///
    /// # Panics
    /// Panics if the staged structure id is not registered.
    pub fn step(
        &mut self,
        structures: &mut StructureRegistry,
        manager: &mut OperationManager,
    ) -> StepOutcome {
        let Some(staged) = self.staged.as_mut() else {
            return StepOutcome::NotStepping;
        };
        if !staged.stepping {
            return StepOutcome::NotStepping;
        }

        if staged.cursor < staged.operation.step_count() {
            let Some(structure) = structures.get_mut(staged.structure) else {
                panic!(
                    "cannot step operation against unregistered structure {}",
                    staged.structure
                );
            };
            staged.operation.step_mut(staged.cursor).execute(structure);
            staged.cursor += 1;
        }

        if staged.cursor >= staged.operation.step_count() {
            if let Some(done) = self.staged.take() {
                manager.execute_operation(structures, done.structure, done.operation, true);
            }
            return StepOutcome::Completed;
        }
        StepOutcome::Advanced
    }

    /// Run the staged operation to completion in one shot through the
    /// manager. Only valid before stepping has started; returns false
    /// otherwise.
    pub fn execute_all(
        &mut self,
        structures: &mut StructureRegistry,
        manager: &mut OperationManager,
    ) -> bool {
        if !matches!(&self.staged, Some(staged) if !staged.stepping) {
            return false;
        }
        if let Some(staged) = self.staged.take() {
            manager.execute_operation(structures, staged.structure, staged.operation, false);
        }
        true
    }

    /// Discard the staged operation without mutating anything. Only
    /// valid before stepping has started: once a step has run, the
    /// composite must complete and enter history.
    pub fn cancel(&mut self) -> bool {
        if !matches!(&self.staged, Some(staged) if !staged.stepping) {
            return false;
        }
        self.staged = None;
        true
    }

    pub fn phase(&self) -> Phase {
        match &self.staged {
            None => Phase::Idle,
            Some(staged) if staged.stepping => Phase::Stepping,
            Some(_) => Phase::Staged,
        }
    }

    /// The atomic operation about to execute, if any
    pub fn current_atomic(&self) -> Option<&AtomicOp> {
        let staged = self.staged.as_ref()?;
        staged.operation.steps().get(staged.cursor)
    }

    /// Steps executed so far
    pub fn current_step(&self) -> usize {
        self.staged.as_ref().map_or(0, |staged| staged.cursor)
    }

    /// Step count of the staged operation, 0 when idle
    pub fn total_steps(&self) -> usize {
        self.staged
            .as_ref()
            .map_or(0, |staged| staged.operation.step_count())
    }

    /// Name of the staged operation, for the control panel header
    pub fn staged_name(&self) -> Option<&str> {
        self.staged.as_ref().map(|staged| staged.operation.name())
    }
}
