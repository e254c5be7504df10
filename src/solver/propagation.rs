/*!
Unit propagation over two watched literals.

Each clause watches two of its positions. Whenever a literal becomes true, only
the clauses watching its negation are examined: for each, either the other watch
already satisfies the clause, a non-false unwatched position takes over the
falsified watch, or the clause is unit (its other watch is pushed) or conflicting.

Literals are taken from the trail in the order they were pushed, so the literals
forced by one assignment are themselves propagated before the next decision.
*/

use crate::{
    misc::log::targets,
    solver::{Conflict, Solver, literal::Literal, variable::VariableValue},
};

impl Solver {
    /// Propagates every literal pushed to the trail and not yet propagated.
    ///
    /// On success the watch invariant holds for every clause. On conflict the
    /// remaining queue is discarded; the caller must backtrack.
    pub(crate) fn propagate(&mut self) -> Result<(), Conflict> {
        while let Some(literal) = self.trail.next_to_propagate() {
            self.stats.num_propagations += 1;
            if let Err(conflict) = self.propagate_literal(literal) {
                self.stats.num_conflicts += 1;
                self.trail.skip_propagation();
                log::trace!(target: targets::PROPAGATION, "Propagating {literal} ended in conflict {conflict:?}");
                return Err(conflict);
            }
        }
        Ok(())
    }

    /// Restores the watch invariant for the clauses watching `!literal`
    fn propagate_literal(&mut self, literal: Literal) -> Result<(), Conflict> {
        let falsified = !literal;
        let mut watches = self.watches.take(falsified);
        let num_watches = watches.len();
        let mut result = Ok(());

        // Watches kept for `falsified` are compacted into `watches[..j]`
        let mut i = 0;
        let mut j = 0;
        while i < num_watches {
            let clause_ref = watches[i];
            i += 1;

            let clause = &mut self.clauses[clause_ref];
            let Some(slot) = clause.slot_of(falsified) else {
                log::error!(target: targets::PROPAGATION, "Clause {clause_ref} is listed under {falsified} without watching it");
                continue;
            };
            let other = clause.watched(1 - slot);
            let values = self.trail.values();

            // Clause already satisfied by the other watch
            if other.is_true(values) {
                watches[j] = clause_ref;
                j += 1;
                continue;
            }

            // Look for new watch that is not already false
            if let Some(position) = clause.find_replacement(values) {
                clause.move_watch(slot, position);
                let new_watch = clause.watched(slot);
                self.watches.watch(new_watch, clause_ref);
                log::trace!(target: targets::PROPAGATION, "Clause {clause_ref} now watches {new_watch} instead of {falsified}");
                continue;
            }

            // Did not find new watch; clause is unit or conflicting
            watches[j] = clause_ref;
            j += 1;
            match other.value(values) {
                VariableValue::True => {}
                VariableValue::Unset => {
                    log::trace!(target: targets::PROPAGATION, "Clause {clause_ref} forces {other}");
                    if let Err(conflict) = self.trail.push(other) {
                        result = Err(conflict);
                        break;
                    }
                }
                VariableValue::False => {
                    result = Err(Conflict::Clause(clause_ref));
                    break;
                }
            }
        }

        // Keep the unprocessed tail after a conflict
        while i < num_watches {
            watches[j] = watches[i];
            i += 1;
            j += 1;
        }
        watches.truncate(j);
        self.watches.restore(falsified, watches);

        result
    }
}
