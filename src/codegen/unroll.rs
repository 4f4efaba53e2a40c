//! Loop unrolling by literal duplication
//!
//! `clone_range` appends copies of a contiguous range of quads. Each copy gets its
//! own jump targets relocated, so a jump that pointed inside the original range points
//! at the matching quad of the same copy. Jumps leaving the range (loop exits, post-loop
//! labels) keep their target and all copies share that destination.

use crate::codegen::error::CodegenError;
use crate::codegen::quad::{Destination, Quad, QuadKind};
use crate::codegen::session::CodegenSession;

impl CodegenSession {
    /// Append `times` copies of quads `[start, end)`
    ///
    /// A non-positive `times` or an empty range does nothing, wherever it points. Any
    /// other range must lie within the emitted code.
    pub fn clone_range(
        &mut self,
        start: usize,
        end: usize,
        times: i64,
    ) -> Result<(), CodegenError> {
        if times <= 0 || start == end {
            log::debug!(
                "clone_range [{}, {}) x{}: nothing to unroll",
                start,
                end,
                times
            );
            return Ok(());
        }
        let next = self.current_end_index();
        if start == 0 || start > end || end > next {
            return Err(CodegenError::InvalidRange { start, end, next });
        }

        let body: Vec<Quad> = self.code[start - 1..end - 1].to_vec();
        for repetition in 1..=times {
            self.ensure_room(body.len())?;
            let copy_start = self.current_end_index();
            let offset = copy_start - start;
            log::debug!(
                "clone_range [{}, {}) repetition {}/{} at {} (offset {})",
                start,
                end,
                repetition,
                times,
                copy_start,
                offset
            );

            for quad in &body {
                let mut copy = quad.clone();
                relocate(&mut copy, start, end, offset);
                self.code.push(copy);
            }
        }
        Ok(())
    }
}

/// Shift a jump target that falls inside `[start, end)` by `offset`
fn relocate(quad: &mut Quad, start: usize, end: usize, offset: usize) {
    match quad.kind {
        QuadKind::CondJump { .. } | QuadKind::Goto => {
            if let Destination::Target(target) = quad.res {
                if (start..end).contains(&target) {
                    quad.res = Destination::Target(target + offset);
                }
            }
        }
        QuadKind::Halt
        | QuadKind::ArrayStore
        | QuadKind::ArrayLoad
        | QuadKind::Param
        | QuadKind::Call
        | QuadKind::Assign
        | QuadKind::Op(_) => {}
    }
}

#[cfg(test)]
#[path = "unroll_tests.rs"]
mod tests;
