//! Structured simulation events and the sinks that collect them
//!
//! The tick pipeline only ever calls [`EventSink::emit`], which must not
//! block. Formatting and persistence belong to the sink.

use crate::core::error::Result;
use crate::core::types::{Position, Tick};
use crate::entity::drives::{Drive, DriveType};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One drive level as reported in entity updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveReading {
    #[serde(rename = "type")]
    pub drive_type: DriveType,
    pub value: f32,
}

impl From<&Drive> for DriveReading {
    fn from(drive: &Drive) -> Self {
        Self {
            drive_type: drive.drive_type,
            value: drive.intensity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimEvent {
    SimulationStart {
        npc_count: usize,
        object_count: usize,
        world_size: f32,
    },
    TickStart {
        #[serde(rename = "tick_number")]
        tick: Tick,
        generation: u32,
    },
    Perception {
        #[serde(rename = "tick_number")]
        tick: Tick,
        pair_count: usize,
    },
    ActionExecution {
        entity_id: String,
        action_type: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target_id: Option<String>,
    },
    EntityUpdate {
        entity_id: String,
        /// "NPC" or "Object"
        entity_type: String,
        position: Position,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        drives: Option<Vec<DriveReading>>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        current_action: Option<String>,
    },
    TickEnd {
        #[serde(rename = "tick_number")]
        tick: Tick,
        generation: u32,
        npc_count: usize,
        object_count: usize,
    },
    SimulationEnd {
        total_ticks: Tick,
        final_generation: u32,
        npc_count: usize,
        object_count: usize,
    },
}

impl SimEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::SimulationStart { .. } => "SIMULATION_START",
            SimEvent::TickStart { .. } => "TICK_START",
            SimEvent::Perception { .. } => "PERCEPTION",
            SimEvent::ActionExecution { .. } => "ACTION_EXECUTION",
            SimEvent::EntityUpdate { .. } => "ENTITY_UPDATE",
            SimEvent::TickEnd { .. } => "TICK_END",
            SimEvent::SimulationEnd { .. } => "SIMULATION_END",
        }
    }
}

/// Receiver of simulation events
pub trait EventSink {
    /// Record an event. Must not block the tick loop.
    fn emit(&mut self, event: SimEvent);

    /// Persist whatever has been buffered
    fn flush(&mut self) -> Result<()>;
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<SimEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// An event stamped with wall-clock milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub timestamp: u64,
    #[serde(flatten)]
    pub event: SimEvent,
}

/// Buffers events and writes them as one JSON array
pub struct JsonFileSink {
    path: PathBuf,
    file: File,
    records: Vec<TimestampedEvent>,
}

impl JsonFileSink {
    /// Open (and truncate) the output file, creating parent directories
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            file,
            records: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl EventSink for JsonFileSink {
    fn emit(&mut self, event: SimEvent) {
        self.records.push(TimestampedEvent {
            timestamp: now_millis(),
            event,
        });
    }

    /// Rewrite the file with every event recorded so far
    fn flush(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        let mut writer = BufWriter::new(&self.file);
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
