//=========================================================================
// Script Stack
//=========================================================================
//
// Fixed-depth call stack of an interactive object.
//
// Level 0 holds the object's base script. Each matched event pushes one
// frame whose script id and program counter both start at the event's
// script id. The depth is a build-time constant; pushing past it is a
// `StackOverflow` instead of silent corruption.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ScriptId;
use crate::core::error::{CoreError, CoreResult};

//=== Constants ===========================================================

/// Number of frames in every object's script stack.
pub const SCRIPT_LEVELS: usize = 5;

//=== ScriptFrame =========================================================

/// One level of the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptFrame {
    pub script_id: ScriptId,
    pub program_counter: u32,
}

//=== ScriptStack =========================================================

/// Parallel script-id / program-counter arrays indexed by `level`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptStack {
    level: usize,
    script_id: [ScriptId; SCRIPT_LEVELS],
    program_counter: [u32; SCRIPT_LEVELS],
}

impl ScriptStack {
    /// Creates a stack at level 0 running `base`.
    pub fn new(base: ScriptId) -> Self {
        let mut stack = Self::default();
        stack.script_id[0] = base;
        stack.program_counter[0] = base;
        stack
    }

    /// Current level (0 = base script).
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_full(&self) -> bool {
        self.level + 1 >= SCRIPT_LEVELS
    }

    /// Pushes a new frame starting at `script`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StackOverflow`] if every level is in use; the
    /// stack is left untouched.
    pub fn push(&mut self, script: ScriptId) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::StackOverflow {
                capacity: SCRIPT_LEVELS,
            });
        }

        self.level += 1;
        self.script_id[self.level] = script;
        self.program_counter[self.level] = script;
        Ok(())
    }

    /// Drops the top frame, returning it. The base frame is never popped.
    pub fn pop(&mut self) -> Option<ScriptFrame> {
        if self.level == 0 {
            return None;
        }

        let frame = self.current();
        self.level -= 1;
        Some(frame)
    }

    /// Frame at the current level.
    pub fn current(&self) -> ScriptFrame {
        ScriptFrame {
            script_id: self.script_id[self.level],
            program_counter: self.program_counter[self.level],
        }
    }

    /// Frame at `level`, if that level is in use.
    pub fn frame(&self, level: usize) -> Option<ScriptFrame> {
        (level <= self.level).then(|| ScriptFrame {
            script_id: self.script_id[level],
            program_counter: self.program_counter[level],
        })
    }

    /// Moves the program counter of the current frame.
    pub fn set_program_counter(&mut self, pc: u32) {
        self.program_counter[self.level] = pc;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
