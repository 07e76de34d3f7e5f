// Hook/fish intersection and catch scoring.

use super::fish::{Fish, FishId, ItemKind, LabeledItem, Payload};
use super::mode::Mode;

/// True when the hook square at `(hx, hy)` overlaps the fish box. Edges that
/// merely touch do not count.
pub fn intersects(hx: f64, hy: f64, hook_size: f64, fish: &Fish) -> bool {
    hx < fish.x + fish.width && hx + hook_size > fish.x && hy < fish.y + fish.height && hy + hook_size > fish.y
}

/// Items of a fish that count under `mode`, each with its summary text.
fn judged_items(payload: &Payload, mode: Mode) -> Vec<(LabeledItem, String)> {
    match (payload, mode) {
        (Payload::Simple(item), _) => vec![(*item, item.label.to_string())],
        (Payload::Advanced { sender, hook }, Mode::Advanced(level)) => {
            let mut out = Vec::with_capacity(2);
            if let Some(s) = sender.filter(|_| level.judges_sender()) {
                out.push((s, format!("Sender: {}", s.label)));
            }
            if let Some(h) = hook.filter(|_| level.judges_hook()) {
                out.push((h, format!("Hook: {}", h.label)));
            }
            out
        }
        // An advanced fish caught in simple mode carries nothing to judge.
        (Payload::Advanced { .. }, Mode::Simple) => Vec::new(),
    }
}

/// Result of resolving one hooked fish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catch {
    pub fish: FishId,
    pub delta: i32,
    /// Summary lines, each tagged with the kind of the item it describes.
    pub entries: Vec<(ItemKind, String)>,
}

/// Score a caught fish: `+points` per judged bad item, `-points` per judged
/// good item.
pub fn score_catch(fish: &Fish, mode: Mode, points: i32) -> Catch {
    let items = judged_items(&fish.payload, mode);
    let delta = items.iter().map(|(item, _)| item.kind.delta(points)).sum();
    Catch {
        fish: fish.id,
        delta,
        entries: items.into_iter().map(|(item, text)| (item.kind, text)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::mode::AdvancedLevel;

    fn fish_at(x: f64, y: f64, payload: Payload) -> Fish {
        Fish::new(9, x, y, 2.0, (120.0, 90.0), payload)
    }

    fn item(label: &'static str, kind: ItemKind) -> LabeledItem {
        LabeledItem { label, kind }
    }

    fn simple(kind: ItemKind) -> Payload {
        Payload::Simple(item("Fake Prize", kind))
    }

    #[test]
    fn hook_inside_box_intersects() {
        let f = fish_at(100.0, 200.0, simple(ItemKind::Bad));
        assert!(intersects(150.0, 250.0, 20.0, &f));
        // Hook square overlapping the top-left corner from outside.
        assert!(intersects(85.0, 185.0, 20.0, &f));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let f = fish_at(100.0, 200.0, simple(ItemKind::Bad));
        assert!(!intersects(80.0, 250.0, 20.0, &f));
        assert!(!intersects(220.0, 250.0, 20.0, &f));
        assert!(!intersects(150.0, 180.0, 20.0, &f));
        assert!(!intersects(150.0, 290.0, 20.0, &f));
    }

    #[test]
    fn simple_scoring() {
        let bad = score_catch(&fish_at(0.0, 0.0, simple(ItemKind::Bad)), Mode::Simple, 10);
        assert_eq!(bad.delta, 10);
        assert_eq!(bad.entries, vec![(ItemKind::Bad, "Fake Prize".to_string())]);
        let good = score_catch(&fish_at(0.0, 0.0, simple(ItemKind::Good)), Mode::Simple, 10);
        assert_eq!(good.delta, -10);
    }

    #[test]
    fn mixed_fish_at_level_three_nets_zero() {
        let payload = Payload::Advanced {
            sender: Some(item("help@gamez.net", ItemKind::Bad)),
            hook: Some(item("Syllabus PDF", ItemKind::Good)),
        };
        let c = score_catch(&fish_at(0.0, 0.0, payload), Mode::Advanced(AdvancedLevel::Both), 10);
        assert_eq!(c.delta, 0);
        assert_eq!(
            c.entries,
            vec![
                (ItemKind::Bad, "Sender: help@gamez.net".to_string()),
                (ItemKind::Good, "Hook: Syllabus PDF".to_string()),
            ]
        );
    }

    #[test]
    fn only_items_relevant_to_level_count() {
        let payload = Payload::Advanced {
            sender: Some(item("teacher@school.edu", ItemKind::Good)),
            hook: Some(item("Verify account now", ItemKind::Bad)),
        };
        let f = fish_at(0.0, 0.0, payload);
        let senders = score_catch(&f, Mode::Advanced(AdvancedLevel::Senders), 10);
        assert_eq!(senders.delta, -10);
        assert_eq!(senders.entries.len(), 1);
        let hooks = score_catch(&f, Mode::Advanced(AdvancedLevel::Hooks), 10);
        assert_eq!(hooks.delta, 10);
        assert_eq!(hooks.entries, vec![(ItemKind::Bad, "Hook: Verify account now".to_string())]);
    }

    #[test]
    fn both_bad_doubles_up() {
        let payload = Payload::Advanced {
            sender: Some(item("unknown@random-domain.biz", ItemKind::Bad)),
            hook: Some(item("Click to claim prize", ItemKind::Bad)),
        };
        let c = score_catch(&fish_at(0.0, 0.0, payload), Mode::Advanced(AdvancedLevel::Both), 10);
        assert_eq!(c.delta, 20);
    }
}
