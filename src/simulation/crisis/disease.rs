//! Outbreaks in crowded colonies with many breeding pits

use crate::colony::{Colony, Tier};
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let d = &env.config().disease;

    if colony.is_diseased() {
        colony.disease_turns -= 1;
        let babies = ((colony.baby as f64 * d.baby_mortality) as u32).max(1);
        let children = (colony.child as f64 * d.child_mortality) as u32;
        let babies = colony.remove_population(Tier::Baby, babies);
        let children = colony.remove_population(Tier::Child, children);

        if colony.disease_turns > 0 {
            let msg = format!(
                "Disease spreads: {} babies and {} children died ({} turns left).",
                babies, children, colony.disease_turns
            );
            env.log_flavored(colony, EventKind::Disease, msg, "disease", Some("tick"));
        } else {
            env.log_flavored(
                colony,
                EventKind::Disease,
                format!("The disease ran its course after taking {} babies and {} children.", babies, children),
                "disease",
                Some("end"),
            );
        }
        return;
    }

    let population = colony.total_population();
    if population == 0 {
        return;
    }
    let occupancy = population as f64 / colony.population_cap.max(1) as f64;
    if occupancy >= d.occupancy_threshold
        && colony.breeding_pits >= d.min_breeding_pits
        && env.chance(d.onset_chance)
    {
        colony.disease_turns = env.span(d.duration);
        let msg = format!("Outbreak! Disease will last {} turns.", colony.disease_turns);
        env.log_flavored(colony, EventKind::Disease, msg, "disease", Some("outbreak"));
    }
}
