// Textual rendering of the instruction buffer
//
// One line per quad, `N: <instruction>`, in index order. The line layout itself lives
// in `Quad`'s Display impl.

use crate::codegen::session::CodegenSession;
use std::io::{self, Write};

impl CodegenSession {
    /// Write every quad to `sink`
    pub fn render<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let unresolved = self.unresolved_jumps();
        if !unresolved.is_empty() {
            log::warn!(
                "Rendering {} unresolved jump(s) at {:?}",
                unresolved.len(),
                unresolved
            );
        }
        for (index, quad) in self.quads() {
            writeln!(sink, "{}: {}", index, quad)?;
        }
        sink.flush()
    }

    pub fn render_to_string(&self) -> String {
        let mut out = Vec::new();
        if let Err(err) = self.render(&mut out) {
            // Writes into a Vec<u8> cannot fail
            log::error!("Rendering to memory failed: {}", err);
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
