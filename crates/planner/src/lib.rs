//! The offline fallback planner.
//!
//! When no model backend is reachable, Uniplan still answers scheduling
//! questions with a deterministic plan built from the catalog: a single
//! greedy pass over sections in catalog order, filtered by the student's
//! preferred days and declared time blocks, capped at four picks. If the
//! filters reject everything, a small random sample keeps the plan
//! non-empty so the student never gets a blank answer.
//!
//! This is intentionally not a timetabling solver — no conflict checks,
//! no optimality. It is the best plan one pass can give.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use uniplan_catalog::Catalog;
use uniplan_core::{AdvisorReply, Schedule, ScheduleBlock, Section, StudentProfile, parse_minutes};

/// Maximum sections chosen by the constrained pass.
pub const MAX_SECTIONS: usize = 4;

/// Sections drawn by the random escape hatch when nothing passes.
pub const SAMPLE_SIZE: usize = 3;

/// Produce an offline plan for the student.
///
/// `notes` carries a short diagnostic excerpt when the fallback was
/// triggered by an upstream failure rather than by the absence of a
/// model; it is appended to the summary message.
pub fn plan(profile: &StudentProfile, catalog: &Catalog, notes: Option<&str>) -> AdvisorReply {
    plan_with_rng(profile, catalog, notes, &mut rand::rng())
}

/// [`plan`] with an injectable random source, so the escape hatch is
/// deterministic under test.
pub fn plan_with_rng<R: Rng + ?Sized>(
    profile: &StudentProfile,
    catalog: &Catalog,
    notes: Option<&str>,
    rng: &mut R,
) -> AdvisorReply {
    let chosen = select_sections(profile, &catalog.sections, rng);
    debug!(
        chosen = chosen.len(),
        catalog = catalog.sections.len(),
        "Offline planner selected sections"
    );

    let schedule = project_schedule(&chosen, catalog);

    AdvisorReply {
        message: compose_message(profile, notes),
        schedule: Some(schedule),
        debug: None,
    }
}

/// Greedy constrained selection over sections in catalog order.
///
/// First match wins per slot, stopping once [`MAX_SECTIONS`] are chosen.
/// If nothing passes and the catalog is non-empty, falls through to a
/// uniform random sample of up to [`SAMPLE_SIZE`] sections — best-effort,
/// not constraint-satisfying.
fn select_sections<'a, R: Rng + ?Sized>(
    profile: &StudentProfile,
    sections: &'a [Section],
    rng: &mut R,
) -> Vec<&'a Section> {
    let mut chosen: Vec<&Section> = Vec::new();

    for section in sections {
        if chosen.len() >= MAX_SECTIONS {
            break;
        }

        if !profile.preferred_days.is_empty()
            && !section
                .days
                .iter()
                .any(|day| profile.preferred_days.contains(day))
        {
            continue;
        }

        if !fits_time_blocks(profile, section) {
            continue;
        }

        chosen.push(section);
    }

    if chosen.is_empty() && !sections.is_empty() {
        chosen = sections.choose_multiple(rng, SAMPLE_SIZE).collect();
    }

    chosen
}

/// Check the section against the student's declared time blocks.
///
/// Every meeting day must pass: on a day with declared blocks the
/// section's [start, end) interval must fit entirely inside at least one
/// block. A single failing day rejects the whole section.
///
/// Fail-open cases, per the time-parser contract:
/// - a day with no declared blocks imposes no constraint;
/// - an unparseable section start/end skips that day's check;
/// - a block whose own bounds do not parse cannot attest containment and
///   is ignored; if none of a day's blocks parse, the day is treated as
///   unconstrained.
fn fits_time_blocks(profile: &StudentProfile, section: &Section) -> bool {
    for day in &section.days {
        let Some(blocks) = profile.time_blocks.get(day) else {
            continue;
        };
        if blocks.is_empty() {
            continue;
        }

        let (Some(start), Some(end)) = (parse_minutes(&section.start), parse_minutes(&section.end))
        else {
            continue;
        };

        let mut any_parseable = false;
        let mut contained = false;
        for block in blocks {
            if let (Some(from), Some(to)) = (parse_minutes(&block.from), parse_minutes(&block.to)) {
                any_parseable = true;
                if from <= start && to >= end {
                    contained = true;
                    break;
                }
            }
        }

        if any_parseable && !contained {
            return false;
        }
    }

    true
}

/// Project chosen sections into a day-keyed schedule.
///
/// Each section contributes one block per meeting day, carrying the
/// professor's display name when a record exists (raw `profId`
/// otherwise). Days are only inserted when a block lands on them, so no
/// key ever maps to an empty list.
fn project_schedule(chosen: &[&Section], catalog: &Catalog) -> Schedule {
    let mut schedule = Schedule::new();

    for section in chosen {
        let prof = catalog
            .professors
            .get(&section.prof_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| section.prof_id.clone());

        for day in &section.days {
            schedule.entry(*day).or_default().push(ScheduleBlock {
                from: section.start.clone(),
                to: section.end.clone(),
                course: section.course_id.clone(),
                title: section.course_title.clone(),
                prof: prof.clone(),
            });
        }
    }

    schedule
}

/// Compose the human-readable summary, referencing declared interests
/// (or a generic phrase when none were declared). The upstream failure
/// note, when present, is appended in a parenthesized suffix.
fn compose_message(profile: &StudentProfile, notes: Option<&str>) -> String {
    let interests = if profile.interests.is_empty() {
        "your interests".to_string()
    } else {
        profile.interests.join(", ")
    };

    let mut message = format!(
        "Here's a quick offline plan that respects your highlighted days and interests. \
         I prioritized sections that match {interests}."
    );

    if let Some(notes) = notes {
        message.push_str(&format!("\n\n(Debug: {notes})"));
    }

    message
}
