//! Static product catalog offered by the combination selector.
//!
//! Lines and processes are not independent: each line runs a subset of the
//! processes, and the selector only offers combinations that exist.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::WizardError;

/// A production line and the processes it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub processes: &'static [&'static str],
}

impl Line {
    pub fn offers(&self, process_id: &str) -> bool {
        self.processes.iter().any(|p| *p == process_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: &'static str,
    pub label: &'static str,
}

pub const LINES: &[Line] = &[
    Line {
        id: "linha_1",
        label: "Linha 1",
        description: "Primeira linha de produção",
        processes: &["processo_1", "processo_2", "processo_3"],
    },
    Line {
        id: "linha_2",
        label: "Linha 2",
        description: "Segunda linha de produção",
        processes: &["processo_1", "processo_2", "processo_3"],
    },
    Line {
        id: "linha_3",
        label: "Linha 3",
        description: "Terceira linha de produção",
        processes: &["processo_2", "processo_4"],
    },
    Line {
        id: "linha_4",
        label: "Linha 4",
        description: "Quarta linha de produção",
        processes: &["processo_1", "processo_2", "processo_3"],
    },
];

pub const PROCESSES: &[Process] = &[
    Process { id: "processo_1", label: "Processo 1" },
    Process { id: "processo_2", label: "Processo 2" },
    Process { id: "processo_3", label: "Processo 3" },
    Process { id: "processo_4", label: "Processo 4" },
];

pub fn line(id: &str) -> Option<&'static Line> {
    LINES.iter().find(|line| line.id == id)
}

pub fn process(id: &str) -> Option<&'static Process> {
    PROCESSES.iter().find(|process| process.id == id)
}

/// Lines that run every one of the selected processes.
///
/// With no process selected every line is enabled.
pub fn enabled_lines(selected_processes: &BTreeSet<String>) -> Vec<&'static Line> {
    LINES
        .iter()
        .filter(|line| selected_processes.iter().all(|p| line.offers(p)))
        .collect()
}

/// Processes shared by all selected lines.
///
/// With no line selected every process is enabled.
pub fn enabled_processes(selected_lines: &BTreeSet<String>) -> Vec<&'static Process> {
    let lines: Vec<&Line> = selected_lines.iter().filter_map(|id| line(id)).collect();

    PROCESSES
        .iter()
        .filter(|process| lines.iter().all(|line| line.offers(process.id)))
        .collect()
}

/// ABC classification of SKUs by revenue share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub const ALL: [AbcClass; 3] = [AbcClass::A, AbcClass::B, AbcClass::C];

    pub fn as_str(self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AbcClass::A => "Classe A",
            AbcClass::B => "Classe B",
            AbcClass::C => "Classe C",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AbcClass::A => "Alta prioridade",
            AbcClass::B => "Média prioridade",
            AbcClass::C => "Baixa prioridade",
        }
    }
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbcClass {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AbcClass::A),
            "B" => Ok(AbcClass::B),
            "C" => Ok(AbcClass::C),
            _ => Err(WizardError::UnknownClass(s.to_string())),
        }
    }
}
