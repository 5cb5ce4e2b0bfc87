//! Episode formation - promoting runs of observations to episodic memory
//!
//! The perception buffer is cut into temporally coherent runs. Runs whose
//! merged emotional impact is strong enough become episodes, or reinforce
//! an existing episode they resemble.

use crate::core::config::MemoryParams;
use crate::core::types::Tick;
use crate::entity::drives::DriveImpact;
use crate::entity::npc::Npc;
use crate::memory::{ActionSequence, MemoryEntry, MemoryEpisode, PerceptionBuffer};
use crate::simulation::drive_impact::{evaluate_impact, is_significant, merge_impacts};
use crate::store::Ref;

/// Split a buffer into runs of observations no more than `max_gap` ticks apart
///
/// Entries are ordered by timestamp first (ties keep buffer order). Runs
/// shorter than `min_length` are dropped.
pub fn identify_sequences(
    buffer: &PerceptionBuffer,
    max_gap: Tick,
    min_length: usize,
) -> Vec<Vec<Ref<MemoryEntry>>> {
    let mut sorted: Vec<Ref<MemoryEntry>> = buffer.entries().to_vec();
    sorted.sort_by_key(|e| e.timestamp);

    let mut runs = Vec::new();
    let mut current: Vec<Ref<MemoryEntry>> = Vec::new();

    for entry in sorted {
        let continues = current
            .last()
            .map(|last| entry.timestamp - last.timestamp <= max_gap)
            .unwrap_or(true);

        if !continues {
            let finished = std::mem::take(&mut current);
            if finished.len() >= min_length {
                runs.push(finished);
            }
        }
        current.push(entry);
    }

    if !current.is_empty() && current.len() >= min_length {
        runs.push(current);
    }

    runs
}

/// Merged impact of a whole run on the observer
pub fn evaluate_sequence_impact(observer: &Npc, run: &[Ref<MemoryEntry>]) -> Vec<DriveImpact> {
    merge_impacts(run.iter().flat_map(|entry| evaluate_impact(observer, entry)))
}

/// Index of the first episode with the same number of steps
///
/// A coarse similarity test, kept deliberately simple: step count alone
/// decides whether two runs are "the same" episode.
pub fn find_similar_episode(episodes: &[Ref<MemoryEpisode>], step_count: usize) -> Option<usize> {
    episodes.iter().position(|e| e.step_count() == step_count)
}

/// NPC with episodic memory updated from its current perception buffer
///
/// Returns a clone sharing every field when nothing qualifies.
pub fn form_episodic_memories(npc: &Npc, current_tick: Tick, params: &MemoryParams) -> Npc {
    let runs = identify_sequences(
        &npc.perception,
        params.max_sequence_gap,
        params.min_sequence_length,
    );
    if runs.is_empty() {
        return npc.clone();
    }

    let mut episodes = npc.episodic_memory.clone();
    let mut changed = false;

    for run in runs {
        let impacts = evaluate_sequence_impact(npc, &run);
        if !is_significant(&impacts, params.significance_threshold) {
            continue;
        }

        match find_similar_episode(&episodes, run.len()) {
            Some(index) => {
                let reinforced = episodes[index].reinforced();
                tracing::debug!(
                    npc = npc.id(),
                    sequence = reinforced.action_sequence.id.as_str(),
                    repetitions = reinforced.repetition_count,
                    "episode reinforced"
                );
                episodes[index] = Ref::new(reinforced);
            }
            None => {
                let id = format!("seq_{}_{}", current_tick, run.len());
                let sequence = Ref::new(ActionSequence::from_entries(id, &run));
                tracing::debug!(
                    npc = npc.id(),
                    sequence = sequence.id.as_str(),
                    impacts = ?impacts,
                    "episode formed"
                );
                episodes.push(Ref::new(MemoryEpisode::new(sequence, impacts)));
            }
        }
        changed = true;
    }

    if changed {
        npc.with_episodic_memory(episodes)
    } else {
        npc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionType;
    use crate::core::types::Position;
    use crate::entity::drives::{Drive, DriveType};
    use crate::entity::identity::NpcIdentity;
    use crate::entity::record::EntityRecord;

    fn actor() -> Ref<NpcIdentity> {
        Ref::new(NpcIdentity::new(Ref::new(EntityRecord::new(
            "watcher",
            Position::default(),
        ))))
    }

    fn buffer_at(ticks: &[Tick], action: ActionType) -> PerceptionBuffer {
        let who = actor();
        let entries: Vec<_> = ticks
            .iter()
            .map(|&t| Ref::new(MemoryEntry::new(t, who.clone(), action)))
            .collect();
        PerceptionBuffer::new(20).appended(&entries, 20)
    }

    fn npc_with(buffer: PerceptionBuffer, curiosity: f32) -> Npc {
        Npc::new(actor(), vec![Drive::new(DriveType::Curiosity, curiosity)], 20)
            .with_perception(Ref::new(buffer))
    }

    #[test]
    fn test_runs_split_on_gaps() {
        let buffer = buffer_at(&[1, 2, 4, 20, 21, 40], ActionType::Observe);
        let runs = identify_sequences(&buffer, 5, 2);
        let ticks: Vec<Vec<Tick>> = runs
            .iter()
            .map(|r| r.iter().map(|e| e.timestamp).collect())
            .collect();
        assert_eq!(ticks, vec![vec![1, 2, 4], vec![20, 21]]);
    }

    #[test]
    fn test_unsorted_buffer_is_sorted_first() {
        let buffer = buffer_at(&[9, 3, 5, 4], ActionType::Observe);
        let runs = identify_sequences(&buffer, 5, 2);
        assert_eq!(runs.len(), 1);
        let ticks: Vec<_> = runs[0].iter().map(|e| e.timestamp).collect();
        assert_eq!(ticks, vec![3, 4, 5, 9]);
    }

    #[test]
    fn test_min_length_one_keeps_singletons() {
        let buffer = buffer_at(&[1, 100], ActionType::Observe);
        assert_eq!(identify_sequences(&buffer, 5, 1).len(), 2);
        assert!(identify_sequences(&buffer, 5, 2).is_empty());
    }

    #[test]
    fn test_empty_buffer_leaves_npc_unchanged() {
        let npc = npc_with(PerceptionBuffer::default(), 50.0);
        let updated = form_episodic_memories(&npc, 10, &MemoryParams::default());
        assert!(updated.episodic_memory.is_empty());
        assert_eq!(updated.identity, npc.identity);
    }

    #[test]
    fn test_significant_run_forms_episode() {
        // three strangers observed, curiosity 50: -0.3 each, merged -0.396
        let npc = npc_with(buffer_at(&[1, 2, 3], ActionType::Observe), 50.0);
        let updated = form_episodic_memories(&npc, 7, &MemoryParams::default());

        assert_eq!(updated.episodic_memory.len(), 1);
        let episode = &updated.episodic_memory[0];
        assert_eq!(episode.action_sequence.id, "seq_7_3");
        assert_eq!(episode.repetition_count, 1);
        assert_eq!((episode.start_time, episode.end_time), (1, 3));
        assert_eq!(episode.drive_impacts[0].drive_type, DriveType::Curiosity);
    }

    #[test]
    fn test_insignificant_run_is_discarded() {
        let npc = npc_with(buffer_at(&[1, 2, 3], ActionType::Move), 50.0);
        let updated = form_episodic_memories(&npc, 7, &MemoryParams::default());
        assert!(updated.episodic_memory.is_empty());
    }

    #[test]
    fn test_same_step_count_reinforces_in_place() {
        let npc = npc_with(buffer_at(&[1, 2, 3], ActionType::Observe), 50.0);
        let params = MemoryParams::default();

        let once = form_episodic_memories(&npc, 7, &params);
        let twice = form_episodic_memories(&once, 8, &params);

        assert_eq!(twice.episodic_memory.len(), 1);
        assert_eq!(twice.episodic_memory[0].repetition_count, 2);
        assert_eq!(twice.episodic_memory[0].action_sequence.id, "seq_7_3");
        // the earlier NPC value still sees the earlier episode
        assert_eq!(once.episodic_memory[0].repetition_count, 1);
    }

    #[test]
    fn test_later_runs_match_updated_list() {
        // two 2-step runs in one call: first forms, second reinforces it
        let npc = npc_with(buffer_at(&[1, 2, 30, 31], ActionType::Observe), 50.0);
        let updated = form_episodic_memories(&npc, 40, &MemoryParams::default());

        assert_eq!(updated.episodic_memory.len(), 1);
        assert_eq!(updated.episodic_memory[0].repetition_count, 2);
    }
}
