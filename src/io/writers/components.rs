use crate::errors::Result;
use crate::io::write_failed;
use std::io::Write;

/// One labelled block per component listing its node identifiers, followed
/// by a blank separator line.
pub fn write_component_list<W: Write>(components: &[Vec<String>], out: &mut W) -> Result<()> {
    components
        .iter()
        .enumerate()
        .try_for_each(|(k, component)| {
            writeln!(out, "Component {} (Nodes: {}):", k + 1, component.len())?;
            for id in component {
                writeln!(out, "{}", id)?;
            }
            writeln!(out)
        })
        .map_err(write_failed)
}
