// Compilation session: instruction buffer, name allocators and backpatching
//
// All state for one compilation unit lives here. Grammar actions hold a `&mut
// CodegenSession` and call into it in whatever order the derivation dictates.

use crate::codegen::config::CodegenConfig;
use crate::codegen::error::CodegenError;
use crate::codegen::jump_list::JumpList;
use crate::codegen::quad::{Destination, Quad};

/// Per-compilation-unit code generation state
#[derive(Debug, Clone)]
pub struct CodegenSession {
    config: CodegenConfig,

    // Instruction buffer; quad N lives at code[N - 1]
    pub(crate) code: Vec<Quad>,

    // Name allocators
    temp_counter: u32,
    label_counter: u32,
}

impl Default for CodegenSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CodegenSession {
    /// Create a session with the default configuration
    pub fn new() -> Self {
        Self::with_config(CodegenConfig::default())
    }

    pub fn with_config(config: CodegenConfig) -> Self {
        log::debug!("New codegen session (max_quads={})", config.max_quads);
        Self {
            config,
            code: Vec::new(),
            temp_counter: 1,
            label_counter: 1,
        }
    }

    /// Start a new compilation unit: empty buffer, counters back to their first value
    pub fn reset(&mut self) {
        log::debug!("Resetting codegen session ({} quads discarded)", self.code.len());
        self.code.clear();
        self.temp_counter = 1;
        self.label_counter = 1;
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.max_quads
    }

    /// Index the next emitted quad will occupy
    pub fn current_end_index(&self) -> usize {
        self.code.len() + 1
    }

    /// Number of quads emitted so far
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Quad at a 1-based index
    pub fn quad(&self, index: usize) -> Option<&Quad> {
        index.checked_sub(1).and_then(|i| self.code.get(i))
    }

    pub(crate) fn quad_mut(&mut self, index: usize) -> Option<&mut Quad> {
        index.checked_sub(1).and_then(move |i| self.code.get_mut(i))
    }

    /// All quads with their 1-based indices
    pub fn quads(&self) -> impl Iterator<Item = (usize, &Quad)> + '_ {
        self.code.iter().enumerate().map(|(i, quad)| (i + 1, quad))
    }

    /// Fresh temporary name; `$` keeps it out of the user identifier space
    pub fn new_temporary(&mut self) -> String {
        let name = format!("$t{:02}", self.temp_counter);
        self.temp_counter += 1;
        log::debug!("Allocated temporary {}", name);
        name
    }

    /// Fresh label identifier, numbered independently from temporaries
    pub fn new_label(&mut self) -> String {
        let name = format!("L{:02}", self.label_counter);
        self.label_counter += 1;
        log::debug!("Allocated label {}", name);
        name
    }

    /// Append a quad built from grammar-action text; returns the index it occupies
    pub fn emit(
        &mut self,
        op: &str,
        arg1: Option<&str>,
        arg2: Option<&str>,
        res: Option<&str>,
    ) -> Result<usize, CodegenError> {
        self.emit_quad(Quad::new(op, arg1, arg2, res))
    }

    /// Append an already-built quad; returns the index it occupies
    pub fn emit_quad(&mut self, quad: Quad) -> Result<usize, CodegenError> {
        self.ensure_room(1)?;
        let index = self.current_end_index();
        log::debug!("emit {:4}: {}", index, quad);
        self.code.push(quad);
        Ok(index)
    }

    /// Fail with `CapacityExceeded` unless `additional` more quads fit
    pub(crate) fn ensure_room(&self, additional: usize) -> Result<(), CodegenError> {
        let limit = self.config.max_quads;
        if self.code.len() + additional > limit {
            log::error!(
                "Instruction limit exceeded: {} quads emitted, {} more requested, limit {}",
                self.code.len(),
                additional,
                limit
            );
            return Err(CodegenError::CapacityExceeded { limit });
        }
        Ok(())
    }

    /// Resolve every pending jump in `list` to `target` and consume the list
    ///
    /// Indices outside the emitted range are skipped so a stale list cannot touch
    /// unrelated memory; a warning is logged for each one.
    pub fn backpatch(&mut self, list: JumpList, target: usize) {
        let emitted = self.code.len();
        for index in list.into_indices() {
            let Some(quad) = self.quad_mut(index) else {
                log::warn!(
                    "backpatch: skipping index {} outside emitted range 1..={} (target {})",
                    index,
                    emitted,
                    target
                );
                continue;
            };
            if let Destination::Target(previous) = quad.res {
                if previous != target {
                    log::debug!(
                        "backpatch: index {} already targeted {}, re-targeting to {}",
                        index,
                        previous,
                        target
                    );
                }
            }
            quad.res = Destination::Target(target);
            log::debug!("backpatch {:4} -> {}", index, target);
        }
    }

    /// Indices of jumps still waiting for a target
    pub fn unresolved_jumps(&self) -> Vec<usize> {
        self.quads()
            .filter(|(_, quad)| quad.is_unresolved_jump())
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
