//! Line-based command language of the driver

use std::{io::Write, path::PathBuf};

use anyhow::{Context, anyhow, bail};
use meshmaker_scene::{Document, Mesh, MeshType};

use crate::options::Options;

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    All,
    None,
    Invert,
    Index(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Add { kind: MeshType, steps: u32 },
    Select(Selection),
    Translate([f32; 3]),
    Rotate([f32; 3]),
    Scale([f32; 3]),
    Delete,
    Clone,
    Merge,
    Duplicate([f32; 3]),
    Undo,
    Redo,
    New,
    Open(PathBuf),
    Save(PathBuf),
    List,
    History,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parse one script line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => {
                let name = args.first().ok_or_else(|| anyhow!("add needs a shape"))?;
                let kind = MeshType::from_name(name).ok_or_else(|| anyhow!("unknown shape '{name}'"))?;
                let steps = match args.get(1) {
                    Some(s) => s.parse().with_context(|| format!("invalid step count '{s}'"))?,
                    None => 1,
                };
                Command::Add { kind, steps }
            }
            "select" => Command::Select(match args.first().copied() {
                Some("all") => Selection::All,
                Some("none") => Selection::None,
                Some("invert") => Selection::Invert,
                Some(index) => Selection::Index(index.parse().with_context(|| format!("invalid item index '{index}'"))?),
                None => bail!("select needs all, none, invert or an index"),
            }),
            "translate" => Command::Translate(parse_vector(&args)?),
            "rotate" => Command::Rotate(parse_vector(&args)?),
            "scale" => Command::Scale(parse_vector(&args)?),
            "duplicate" => Command::Duplicate(parse_vector(&args)?),
            "delete" => Command::Delete,
            "clone" => Command::Clone,
            "merge" => Command::Merge,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "new" => Command::New,
            "open" => Command::Open(parse_path(&args)?),
            "save" => Command::Save(parse_path(&args)?),
            "list" => Command::List,
            "history" => Command::History,
            "quit" | "exit" => Command::Quit,
            _ => bail!("unknown command '{verb}'"),
        };
        Ok(Some(command))
    }

    pub fn execute(self, doc: &mut Document, options: &Options, out: &mut impl Write) -> anyhow::Result<Flow> {
        match self {
            Command::Add { kind, steps } => doc.add_item(kind, steps),
            Command::Select(selection) => match selection {
                Selection::All => doc.select_all(),
                Selection::None => doc.deselect_all(),
                Selection::Invert => doc.invert_selection(),
                Selection::Index(index) => {
                    if !doc.select(index, true) {
                        bail!("no item at index {index}");
                    }
                }
            },
            Command::Translate(delta) => report_empty(doc.translate_selected(delta), out)?,
            Command::Rotate(delta) => report_empty(doc.rotate_selected(delta), out)?,
            Command::Scale(factor) => report_empty(doc.scale_selected(factor), out)?,
            Command::Delete => report_empty(doc.delete_selected(), out)?,
            Command::Clone => report_empty(doc.clone_selected(), out)?,
            Command::Merge => {
                if !doc.merge_selected() {
                    writeln!(out, "select at least two items to merge")?;
                }
            }
            Command::Duplicate(offset) => report_empty(doc.duplicate_selected(offset)?, out)?,
            Command::Undo => {
                if !doc.can_undo() {
                    writeln!(out, "nothing to undo")?;
                } else {
                    let name = doc.history().undo_name().unwrap_or_default().to_string();
                    doc.undo()?;
                    writeln!(out, "undo {name}")?;
                }
            }
            Command::Redo => {
                if !doc.can_redo() {
                    writeln!(out, "nothing to redo")?;
                } else {
                    let name = doc.history().redo_name().unwrap_or_default().to_string();
                    doc.redo()?;
                    writeln!(out, "redo {name}")?;
                }
            }
            Command::New => doc.new_document(),
            Command::Open(path) => doc.open(&options.resolve(path))?,
            Command::Save(path) => doc.save(&options.resolve(path))?,
            Command::List => list_items(doc, out)?,
            Command::History => list_history(doc, out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn parse_vector(args: &[&str]) -> anyhow::Result<[f32; 3]> {
    if args.len() != 3 {
        bail!("expected three numbers, got {}", args.len());
    }
    let mut result = [0.0; 3];
    for (slot, arg) in result.iter_mut().zip(args) {
        *slot = arg.parse().with_context(|| format!("invalid number '{arg}'"))?;
    }
    Ok(result)
}

fn parse_path(args: &[&str]) -> anyhow::Result<PathBuf> {
    if args.is_empty() {
        bail!("expected a file name");
    }
    Ok(PathBuf::from(args.join(" ")))
}

fn report_empty(applied: bool, out: &mut impl Write) -> std::io::Result<()> {
    if !applied {
        writeln!(out, "nothing selected")?;
    }
    Ok(())
}

fn list_items(doc: &Document, out: &mut impl Write) -> std::io::Result<()> {
    for (i, item) in doc.scene().items().iter().enumerate() {
        let marker = if item.selected { '*' } else { ' ' };
        let mesh = match &item.mesh {
            Mesh::Primitive { kind, steps } => format!("{kind} ({steps} steps)"),
            Mesh::Merged { parts } => format!("{} parts", parts.len()),
        };
        let [x, y, z] = item.transform.position;
        writeln!(out, "{marker}{i:3} {:<12} {mesh:<24} at ({x}, {y}, {z})", item.name)?;
    }
    Ok(())
}

fn list_history(doc: &Document, out: &mut impl Write) -> std::io::Result<()> {
    let history = doc.history();
    for entry in history.undo_entries() {
        writeln!(out, "  undo: {}", entry.name())?;
    }
    for entry in history.redo_entries().collect::<Vec<_>>().into_iter().rev() {
        writeln!(out, "  redo: {}", entry.name())?;
    }
    Ok(())
}
