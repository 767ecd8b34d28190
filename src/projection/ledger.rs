//! Weekly inflow/outflow totals and the running balance chain.

use std::{collections::HashMap, fmt};

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::model::ForecastModel;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WeekTotals {
    pub pos: f64,
    pub neg: f64,
    pub net: f64,
    pub bop: f64,
    pub eop: f64,
}

/// Totals for every grid week, kept in grid order with lookup by week id.
///
/// Serialized as a JSON object keyed by week id, in grid order.
#[derive(Debug, Clone, Default)]
pub struct WeeklyTotals {
    entries: Vec<(String, WeekTotals)>,
    index: HashMap<String, usize>,
}

impl WeeklyTotals {
    pub fn get(&self, week_id: &str) -> Option<&WeekTotals> {
        self.index.get(week_id).map(|&position| &self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeekTotals)> {
        self.entries.iter().map(|(id, totals)| (id.as_str(), totals))
    }

    pub fn first(&self) -> Option<&WeekTotals> {
        self.entries.first().map(|(_, totals)| totals)
    }

    pub fn last(&self) -> Option<&WeekTotals> {
        self.entries.last().map(|(_, totals)| totals)
    }

    /// End-of-period balance after the final week, the headline projection figure.
    pub fn final_eop(&self) -> Option<f64> {
        self.last().map(|totals| totals.eop)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, week_id: String, totals: WeekTotals) {
        match self.index.get(&week_id) {
            Some(&position) => self.entries[position].1 = totals,
            None => {
                self.index.insert(week_id.clone(), self.entries.len());
                self.entries.push((week_id, totals));
            }
        }
    }
}

impl Serialize for WeeklyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (week_id, totals) in &self.entries {
            map.serialize_entry(week_id, totals)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklyTotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalsVisitor;

        impl<'de> Visitor<'de> for TotalsVisitor {
            type Value = WeeklyTotals;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of week ids to weekly totals")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut totals = WeeklyTotals::default();
                while let Some((week_id, week)) = access.next_entry::<String, WeekTotals>()? {
                    totals.push(week_id, week);
                }
                Ok(totals)
            }
        }

        deserializer.deserialize_map(TotalsVisitor)
    }
}

impl PartialEq for WeeklyTotals {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Sums every row per week and chains balances forward from `bop0`.
///
/// Each week's opening balance is the previous week's closing balance, so the
/// pass runs strictly in grid order.
pub fn compute_weekly_totals(model: &ForecastModel) -> WeeklyTotals {
    let mut totals = WeeklyTotals::default();
    let mut bop = model.bop0;

    for week in &model.weeks {
        let pos: f64 = model.positives.iter().map(|row| row.value(&week.id)).sum();
        let neg: f64 = model.negatives.iter().map(|row| row.value(&week.id)).sum();
        let net = pos + neg;
        let eop = bop + net;
        totals.push(
            week.id.clone(),
            WeekTotals {
                pos,
                neg,
                net,
                bop,
                eop,
            },
        );
        bop = eop;
    }

    totals
}
