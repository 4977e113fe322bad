//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with termimad and the MCP
//! server can return it verbatim.

use std::fmt;

use super::datetime::{ClockTime, Distance, TravelTime};
use crate::{
    models::{
        IndoorOutdoor, Leg, LegEndpoint, Plan, PlanStop, PlanSummary, PreferenceProfile,
        WeatherAdvice,
    },
    planner::SearchResults,
    ranking::RankedPlace,
};

impl fmt::Display for IndoorOutdoor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "# {id}. {}", self.name)?,
            None => writeln!(f, "# {} (unsaved)", self.name)?,
        }
        writeln!(f)?;

        writeln!(f, "- Date: {}", self.date)?;
        writeln!(f, "- Start: {}", ClockTime(&self.start_time))?;
        if !self.origin_address.is_empty() {
            writeln!(f, "- From: {}", self.origin_address)?;
        }
        if self.route.has_legs() {
            writeln!(
                f,
                "- Walking: {} in {}",
                Distance(self.route.total_distance_m),
                TravelTime(self.route.total_duration_s)
            )?;
        }
        let interests = self.snapshot_categories.sub_categories();
        if !interests.is_empty() {
            writeln!(f, "- Interests: {}", interests.join(", "))?;
        }

        if self.route.stops.is_empty() {
            writeln!(f, "\nNo stops in this plan.")?;
            return Ok(());
        }

        writeln!(f, "\n## Itinerary")?;
        writeln!(f)?;
        for stop in &self.route.stops {
            if let Some(leg) = self
                .route
                .legs
                .iter()
                .find(|leg| leg.end == LegEndpoint::Stop(stop.sequence))
            {
                write!(f, "{leg}")?;
            }
            write!(f, "{stop}")?;
        }

        // a single stop never has legs between stops
        if !self.route.has_legs() && self.route.stops.len() > 1 {
            writeln!(f, "\nNo walking route available for this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({} to {})",
            self.sequence + 1,
            self.place.name,
            ClockTime(&self.start_time),
            ClockTime(&self.end_time)
        )?;
        writeln!(f)?;
        if !self.place.address.is_empty() {
            writeln!(f, "{}", self.place.address)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "*Walk {} ({})*",
            Distance(self.distance_m),
            TravelTime(self.duration_s)
        )?;
        writeln!(f)?;
        if self.steps.len() > 1 {
            for step in &self.steps {
                writeln!(f, "- {}", step.instruction)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **When**: {} from {}",
            self.date,
            ClockTime(&self.start_time)
        )?;
        if !self.origin_address.is_empty() {
            writeln!(f, "- **From**: {}", self.origin_address)?;
        }
        write!(f, "- **Stops**: {}", self.total_stops)?;
        if self.total_distance_m > 0 {
            write!(
                f,
                ", {} walking ({})",
                Distance(self.total_distance_m),
                TravelTime(self.total_duration_s)
            )?;
        }
        writeln!(f)?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for WeatherAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "> {}", self.text)
    }
}

impl fmt::Display for PreferenceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Preferences for {}", self.user_id)?;
        writeln!(f)?;
        writeln!(f, "- Radius: {} km", self.radius_km)?;
        if self.categories.is_empty() {
            writeln!(f, "- Interests: none selected (provider defaults)")?;
        } else {
            writeln!(f, "- Interests:")?;
            for (main, subs) in self.categories.main_categories() {
                writeln!(f, "  - {main}: {}", subs.join(", "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for RankedPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let place = &self.place;
        write!(
            f,
            "| {} | {} | {:.1} km | {} | {:.1} |",
            place.id, place.name, place.distance_km, place.indoor_outdoor, self.score
        )
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Places near {}", self.location.formatted_address)?;
        writeln!(f)?;
        write!(f, "{}", self.advice)?;
        writeln!(f)?;
        writeln!(f, "| ID | Name | Distance | Setting | Score |")?;
        writeln!(f, "|:-|:-|-:|:-|-:|")?;
        for ranked in &self.places {
            writeln!(f, "{ranked}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;
    use crate::models::{CategorySelection, Place, Route, Step};

    fn stop(sequence: u32, name: &str, start: i8) -> PlanStop {
        PlanStop {
            sequence,
            place: Place {
                id: name.to_lowercase(),
                name: name.to_string(),
                address: format!("{name} street 1"),
                lat: 0.0,
                lon: 0.0,
                distance_km: 0.0,
                indoor_outdoor: IndoorOutdoor::Mixed,
                categories: Vec::new(),
            },
            start_time: time(start, 0, 0, 0),
            end_time: time(start + 1, 0, 0, 0),
        }
    }

    fn plan(route: Route) -> Plan {
        Plan {
            id: Some(7),
            user_id: "ana".to_string(),
            name: "Saturday".to_string(),
            date: date(2026, 5, 3),
            start_time: time(10, 0, 0, 0),
            origin_address: "Korenmarkt".to_string(),
            route,
            snapshot_radius_km: 2.0,
            snapshot_categories: CategorySelection::new(),
        }
    }

    #[test]
    fn test_plan_with_legs() {
        let route = Route {
            stops: vec![stop(0, "Castle", 10), stop(1, "Museum", 11)],
            legs: vec![Leg {
                distance_m: 1200,
                duration_s: 900,
                polyline: String::new(),
                start: LegEndpoint::Stop(0),
                end: LegEndpoint::Stop(1),
                steps: vec![
                    Step {
                        distance_m: 700,
                        duration_s: 500,
                        instruction: "Head south".to_string(),
                    },
                    Step {
                        distance_m: 500,
                        duration_s: 400,
                        instruction: "Turn left".to_string(),
                    },
                ],
            }],
            total_distance_m: 1200,
            total_duration_s: 900,
            polyline: String::new(),
        };
        let output = plan(route).to_string();

        assert!(output.starts_with("# 7. Saturday"));
        assert!(output.contains("- Walking: 1.2 km in 15 min"));
        assert!(output.contains("### 1. Castle (10:00 to 11:00)"));
        assert!(output.contains("### 2. Museum (11:00 to 12:00)"));
        assert!(output.contains("- Turn left"));
        let walk = output.find("*Walk").unwrap();
        assert!(output.find("Castle (").unwrap() < walk);
        assert!(walk < output.find("Museum (").unwrap());
    }

    #[test]
    fn test_stops_only_plan() {
        let output = plan(Route::stops_only(vec![stop(0, "Castle", 10), stop(1, "Museum", 11)]))
            .to_string();
        assert!(!output.contains("Walking:"));
        assert!(output.contains("No walking route available"));

        let single = plan(Route::stops_only(vec![stop(0, "Castle", 10)])).to_string();
        assert!(!single.contains("No walking route available"));
    }

    #[test]
    fn test_summary_and_preferences() {
        let summary = PlanSummary::from(&plan(Route::stops_only(vec![stop(0, "Castle", 10)])));
        let output = summary.to_string();
        assert!(output.contains("## Saturday (ID: 7)"));
        assert!(output.contains("- **Stops**: 1\n"));

        let profile = PreferenceProfile::defaults_for("ana");
        let output = profile.to_string();
        assert!(output.contains("Radius: 2 km"));
        assert!(output.contains("provider defaults"));
    }
}
