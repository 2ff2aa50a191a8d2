use crate::model::{EffectKind, LearnedModel};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for learned models.
///
/// The output is line oriented: one `fluent:` line per fluent of the
/// vocabulary, then for each learned schema one `action:` line followed by
/// one indented `pre:`/`add:`/`del:` line per relation of its sets. Relation
/// sets are ordered, so the output is deterministic.
#[derive(Default)]
pub struct ModelWriter;

impl ModelWriter {
    /// Writes a learned model.
    pub fn write(&self, model: &LearnedModel, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing a learned model";
        for fluent in model.fluents() {
            writeln!(writer, "fluent: {}", fluent).context(context)?;
        }
        for action in model.actions() {
            writeln!(writer, "action: {}", action).context(context)?;
            for kind in [EffectKind::Precond, EffectKind::Add, EffectKind::Delete] {
                for relation in action.relations_of(kind) {
                    writeln!(writer, "  {}: {}", kind, relation).context(context)?;
                }
            }
        }
        writer.flush().context(context)
    }
}
