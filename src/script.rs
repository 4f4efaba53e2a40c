//! Replay scripts
//!
//! A replay script is a line-oriented record of the calls grammar actions make into a
//! [`CodegenSession`]. It lets the code generator be exercised without a parser:
//!
//! ```text
//! # if (x < 5) y := 1
//! emit IF LTI | x | 5 |      -> false
//! emit GOTO   |   |   |      -> true
//! patch true here
//! emit :=     | 1 |   | y
//! patch false here
//! emit HALT
//! ```
//!
//! Commands:
//! - `emit OP | ARG1 | ARG2 | RES [-> LIST]` emits a quad (empty or `-` field = absent)
//!   and optionally records its index in a named pending-jump list
//! - `temp`, `label` allocate a temporary or label name
//! - `merge DST SRC` merges `SRC` into `DST`
//! - `patch LIST TARGET` backpatches `LIST`; `TARGET` is a number or `here`
//! - `unroll START END TIMES` duplicates a range
//! - `reset` starts a new compilation unit

use crate::codegen::{CodegenError, CodegenSession, JumpList};
use indexmap::IndexMap;

/// Marker for "the index the next emission will occupy"
const HERE: &str = "here";

/// Executes replay script lines against a session
pub struct ScriptRunner<'a> {
    session: &'a mut CodegenSession,
    lists: IndexMap<String, JumpList>,
    line: usize,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(session: &'a mut CodegenSession) -> Self {
        Self {
            session,
            lists: IndexMap::new(),
            line: 0,
        }
    }

    /// Run a whole script; stops at the first failing line
    pub fn run(&mut self, source: &str) -> Result<(), CodegenError> {
        for text in source.lines() {
            self.line += 1;
            self.execute_line(text)?;
        }

        for (name, list) in &self.lists {
            if !list.is_empty() {
                log::warn!(
                    "Pending list '{}' never patched: {:?}",
                    name,
                    list.iter().collect::<Vec<_>>()
                );
            }
        }
        Ok(())
    }

    /// Names of pending lists in creation order
    pub fn list_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.lists.keys().map(String::as_str)
    }

    pub fn pending(&self, name: &str) -> Option<&JumpList> {
        self.lists.get(name)
    }

    fn execute_line(&mut self, text: &str) -> Result<(), CodegenError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }

        let (command, rest) = match text.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (text, ""),
        };
        log::debug!("script line {}: {} {}", self.line, command, rest);

        match command {
            "emit" => self.emit(rest),
            "temp" => {
                self.expect_no_args(command, rest)?;
                self.session.new_temporary();
                Ok(())
            }
            "label" => {
                self.expect_no_args(command, rest)?;
                self.session.new_label();
                Ok(())
            }
            "merge" => {
                let [dst, src] = self.words::<2>(command, rest)?;
                let source = self.lists.shift_remove(src).unwrap_or_default();
                let destination = self.lists.shift_remove(dst).unwrap_or_default();
                self.lists.insert(dst.to_string(), destination.merge(source));
                Ok(())
            }
            "patch" => {
                let [name, target] = self.words::<2>(command, rest)?;
                let target = self.parse_target(target)?;
                let list = self
                    .lists
                    .shift_remove(name)
                    .ok_or_else(|| self.error(format!("unknown pending list '{}'", name)))?;
                self.session.backpatch(list, target);
                Ok(())
            }
            "unroll" => {
                let [start, end, times] = self.words::<3>(command, rest)?;
                let start = self.parse_index(start)?;
                let end = self.parse_target(end)?;
                let times: i64 = times
                    .parse()
                    .map_err(|_| self.error(format!("invalid repeat count '{}'", times)))?;
                self.session.clone_range(start, end, times)
            }
            "reset" => {
                self.expect_no_args(command, rest)?;
                self.session.reset();
                self.lists.clear();
                Ok(())
            }
            other => Err(self.error(format!("unknown command '{}'", other))),
        }
    }

    fn emit(&mut self, rest: &str) -> Result<(), CodegenError> {
        let (fields, list_name) = match rest.split_once("->") {
            Some((fields, name)) => {
                let name = name.trim();
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return Err(self.error(format!("invalid list name '{}'", name)));
                }
                (fields, Some(name))
            }
            None => (rest, None),
        };

        let parts: Vec<&str> = fields.split('|').map(str::trim).collect();
        if parts.len() > 4 {
            return Err(self.error(format!(
                "emit takes at most 4 fields, found {}",
                parts.len()
            )));
        }
        let op = parts[0];
        if op.is_empty() {
            return Err(self.error("emit requires an operation".to_string()));
        }
        let field = |i: usize| {
            parts
                .get(i)
                .copied()
                .filter(|text| !text.is_empty() && *text != "-")
        };

        let index = self.session.emit(op, field(1), field(2), field(3))?;
        if let Some(name) = list_name {
            self.lists
                .entry(name.to_string())
                .or_default()
                .push(index);
        }
        Ok(())
    }

    fn words<'t, const N: usize>(
        &self,
        command: &str,
        rest: &'t str,
    ) -> Result<[&'t str; N], CodegenError> {
        let words: Vec<&str> = rest.split_whitespace().collect();
        words.try_into().map_err(|words: Vec<&str>| {
            self.error(format!(
                "'{}' takes {} argument(s), found {}",
                command,
                N,
                words.len()
            ))
        })
    }

    fn expect_no_args(&self, command: &str, rest: &str) -> Result<(), CodegenError> {
        if rest.is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("'{}' takes no arguments", command)))
        }
    }

    fn parse_index(&self, text: &str) -> Result<usize, CodegenError> {
        text.parse()
            .map_err(|_| self.error(format!("invalid instruction index '{}'", text)))
    }

    fn parse_target(&self, text: &str) -> Result<usize, CodegenError> {
        if text == HERE {
            Ok(self.session.current_end_index())
        } else {
            self.parse_index(text)
        }
    }

    fn error(&self, message: String) -> CodegenError {
        CodegenError::Script(message, self.line)
    }
}

/// Replay `source` against `session`
pub fn run_script(session: &mut CodegenSession, source: &str) -> Result<(), CodegenError> {
    ScriptRunner::new(session).run(source)
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
