use crate::aggregate::flatten_lines;
use crate::model::{CommitSummary, FileUnit};
use std::collections::HashMap;

/// Group the commits' lines per file, largest file first.
pub fn file_units(commits: &[&CommitSummary]) -> Vec<FileUnit> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut units: Vec<FileUnit> = Vec::new();

    for line in flatten_lines(commits) {
        let i = *index.entry(line.file.as_str()).or_insert_with(|| {
            units.push(FileUnit {
                name: line.file.clone(),
                lines: 0,
                types: Vec::new(),
            });
            units.len() - 1
        });
        let unit = &mut units[i];
        unit.lines += 1;
        match unit.types.iter_mut().find(|(kind, _)| *kind == line.kind) {
            Some((_, n)) => *n += 1,
            None => unit.types.push((line.kind.clone(), 1)),
        }
    }

    units.sort_by(|a, b| b.lines.cmp(&a.lines));
    units
}
