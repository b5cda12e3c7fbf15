//! Correlation registry keyed by geometry, transfer, side and regime.
//!
//! The table is built once (from [`MethodTable::default`] plus any overrides)
//! and validated when an exchanger is constructed. A missing entry is a
//! configuration error, never a silent fallback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, CorrelationResult};
use crate::geometry::Geometry;
use crate::methods::{Friction, Heat, chevron, offset_fin, smooth};
use crate::props::FlowInput;
use crate::regime::{GeometryKind, Regime, Side, Transfer};

/// A named correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    ChisholmWanniarachchi,
    YanLin,
    HanLeeKim,
    ManglikBergles,
    ShibaniOzisik,
    Rothfus,
    Huang,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::ChisholmWanniarachchi => "chisholm_wanniarachchi",
            Method::YanLin => "yan_lin",
            Method::HanLeeKim => "han_lee_kim",
            Method::ManglikBergles => "manglik_bergles",
            Method::ShibaniOzisik => "shibani_ozisik",
            Method::Rothfus => "rothfus",
            Method::Huang => "huang",
        }
    }

    pub fn geometry(self) -> GeometryKind {
        match self {
            Method::ChisholmWanniarachchi | Method::YanLin | Method::HanLeeKim => {
                GeometryKind::Chevron
            }
            Method::ManglikBergles => GeometryKind::OffsetFin,
            Method::ShibaniOzisik | Method::Rothfus | Method::Huang => GeometryKind::Smooth,
        }
    }

    /// Whether this method produces `transfer` in `regime`.
    pub fn supports(self, transfer: Transfer, regime: Regime) -> bool {
        let single = !regime.is_two_phase();
        match self {
            Method::ChisholmWanniarachchi | Method::ManglikBergles => single,
            Method::YanLin => regime == Regime::TpEvap,
            Method::HanLeeKim => regime == Regime::TpCond,
            Method::ShibaniOzisik => single && transfer == Transfer::Heat,
            Method::Rothfus => single && transfer == Transfer::Friction,
            Method::Huang => regime == Regime::TpEvap && transfer == Transfer::Heat,
        }
    }

    /// Heat transfer coefficient depends on the wall heat flux.
    pub fn uses_heat_flux(self) -> bool {
        matches!(self, Method::YanLin | Method::Huang)
    }

    fn wrong_geometry(self) -> CorrelationError {
        CorrelationError::WrongGeometry {
            method: self.name(),
            expected: self.geometry(),
        }
    }

    pub fn heat(self, geometry: &Geometry, input: &FlowInput) -> CorrelationResult<Heat> {
        match (self, geometry) {
            (Method::ChisholmWanniarachchi, Geometry::Chevron(g)) => {
                chevron::chisholm_wanniarachchi_heat(g, input)
            }
            (Method::YanLin, Geometry::Chevron(g)) => chevron::yan_lin_heat(g, input),
            (Method::HanLeeKim, Geometry::Chevron(g)) => chevron::han_lee_kim_heat(g, input),
            (Method::ManglikBergles, Geometry::OffsetFin(g)) => {
                offset_fin::manglik_bergles_heat(g, input)
            }
            (Method::ShibaniOzisik, Geometry::Smooth(g)) => smooth::shibani_ozisik_heat(g, input),
            (Method::Huang, Geometry::Smooth(g)) => smooth::huang_heat(g, input),
            (Method::Rothfus, _) => Err(CorrelationError::Incompatible {
                method: self.name(),
                geometry: geometry.kind(),
                transfer: Transfer::Heat,
                regime: Regime::Sp,
            }),
            _ => Err(self.wrong_geometry()),
        }
    }

    pub fn friction(self, geometry: &Geometry, input: &FlowInput) -> CorrelationResult<Friction> {
        match (self, geometry) {
            (Method::ChisholmWanniarachchi, Geometry::Chevron(g)) => {
                chevron::chisholm_wanniarachchi_friction(g, input)
            }
            (Method::YanLin, Geometry::Chevron(g)) => chevron::yan_lin_friction(g, input),
            (Method::HanLeeKim, Geometry::Chevron(g)) => chevron::han_lee_kim_friction(g, input),
            (Method::ManglikBergles, Geometry::OffsetFin(g)) => {
                offset_fin::manglik_bergles_friction(g, input)
            }
            (Method::Rothfus, Geometry::Smooth(g)) => smooth::rothfus_friction(g, input),
            (Method::ShibaniOzisik | Method::Huang, _) => Err(CorrelationError::Incompatible {
                method: self.name(),
                geometry: geometry.kind(),
                transfer: Transfer::Friction,
                regime: Regime::Sp,
            }),
            _ => Err(self.wrong_geometry()),
        }
    }
}

/// Lookup key of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    pub geometry: GeometryKind,
    pub transfer: Transfer,
    pub side: Side,
    pub regime: Regime,
}

impl MethodKey {
    pub fn new(geometry: GeometryKind, transfer: Transfer, side: Side, regime: Regime) -> Self {
        Self {
            geometry,
            transfer,
            side,
            regime,
        }
    }
}

/// One override entry; `method: None` clears the slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodEntry {
    #[serde(flatten)]
    pub key: MethodKey,
    pub method: Option<Method>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodTable {
    entries: BTreeMap<MethodKey, Method>,
}

impl Default for MethodTable {
    fn default() -> Self {
        use GeometryKind::{Chevron, OffsetFin, Smooth};
        use Side::{Sf, Wf};

        let (heat, friction) = (Transfer::Heat, Transfer::Friction);
        let mut entries = BTreeMap::new();
        let mut put = |geometry, transfer, side, regimes: &[Regime], method| {
            for &regime in regimes {
                entries.insert(MethodKey::new(geometry, transfer, side, regime), method);
            }
        };
        let sp = &Regime::SINGLE_PHASE;

        for side in [Wf, Sf] {
            put(Chevron, heat, side, sp, Method::ChisholmWanniarachchi);
            put(Chevron, friction, side, sp, Method::ChisholmWanniarachchi);
            put(OffsetFin, heat, side, sp, Method::ManglikBergles);
            put(OffsetFin, friction, side, sp, Method::ManglikBergles);
            put(Smooth, heat, side, sp, Method::ShibaniOzisik);
            put(Smooth, friction, side, sp, Method::Rothfus);
        }
        put(Chevron, heat, Wf, &[Regime::TpEvap], Method::YanLin);
        put(Chevron, friction, Wf, &[Regime::TpEvap], Method::YanLin);
        put(Chevron, heat, Wf, &[Regime::TpCond], Method::HanLeeKim);
        put(Chevron, friction, Wf, &[Regime::TpCond], Method::HanLeeKim);
        put(Smooth, heat, Wf, &[Regime::TpEvap], Method::Huang);

        Self { entries }
    }
}

impl MethodTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register `method` for `key`, rejecting methods that cannot serve it.
    pub fn set(&mut self, key: MethodKey, method: Method) -> CorrelationResult<()> {
        check(key, method)?;
        self.entries.insert(key, method);
        Ok(())
    }

    pub fn remove(&mut self, key: MethodKey) -> Option<Method> {
        self.entries.remove(&key)
    }

    /// Apply overrides in order.
    pub fn apply(&mut self, overrides: &[MethodEntry]) -> CorrelationResult<()> {
        for entry in overrides {
            match entry.method {
                Some(method) => {
                    self.set(entry.key, method)?;
                    tracing::debug!(key = ?entry.key, method = method.name(), "correlation override");
                }
                None => {
                    self.remove(entry.key);
                    tracing::debug!(key = ?entry.key, "correlation entry cleared");
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, key: MethodKey) -> Option<Method> {
        self.entries.get(&key).copied()
    }

    pub fn resolve(&self, key: MethodKey) -> CorrelationResult<Method> {
        self.get(key).ok_or(CorrelationError::Missing {
            geometry: key.geometry,
            transfer: key.transfer,
            side: key.side,
            regime: key.regime,
        })
    }

    /// Every entry is compatible with its key.
    pub fn validate(&self) -> CorrelationResult<()> {
        self.entries
            .iter()
            .try_for_each(|(key, method)| check(*key, *method))
    }

    /// Both heat and friction methods exist for each regime a side will visit.
    pub fn require(
        &self,
        geometry: GeometryKind,
        side: Side,
        regimes: impl IntoIterator<Item = Regime>,
    ) -> CorrelationResult<()> {
        for regime in regimes {
            for transfer in [Transfer::Heat, Transfer::Friction] {
                self.resolve(MethodKey::new(geometry, transfer, side, regime))?;
            }
        }
        Ok(())
    }

    pub fn heat(
        &self,
        geometry: &Geometry,
        side: Side,
        regime: Regime,
        input: &FlowInput,
    ) -> CorrelationResult<(Method, Heat)> {
        let method = self.resolve(MethodKey::new(geometry.kind(), Transfer::Heat, side, regime))?;
        Ok((method, method.heat(geometry, input)?))
    }

    pub fn friction(
        &self,
        geometry: &Geometry,
        side: Side,
        regime: Regime,
        input: &FlowInput,
    ) -> CorrelationResult<Friction> {
        let method =
            self.resolve(MethodKey::new(geometry.kind(), Transfer::Friction, side, regime))?;
        method.friction(geometry, input)
    }
}

fn check(key: MethodKey, method: Method) -> CorrelationResult<()> {
    if method.geometry() != key.geometry || !method.supports(key.transfer, key.regime) {
        return Err(CorrelationError::Incompatible {
            method: method.name(),
            geometry: key.geometry,
            transfer: key.transfer,
            regime: key.regime,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = MethodTable::default();
        table.validate().unwrap();
        // 6 single-phase pairs x 3 regimes x 2 sides + 5 two-phase entries
        assert_eq!(table.len(), 6 * 3 * 2 + 5);
    }

    #[test]
    fn chevron_wf_covers_every_regime() {
        let table = MethodTable::default();
        table
            .require(GeometryKind::Chevron, Side::Wf, Regime::ALL)
            .unwrap();
    }

    #[test]
    fn secondary_side_has_no_two_phase() {
        let table = MethodTable::default();
        let err = table
            .require(GeometryKind::Chevron, Side::Sf, [Regime::TpEvap])
            .unwrap_err();
        assert!(matches!(err, CorrelationError::Missing { .. }));
    }

    #[test]
    fn smooth_evaporation_lacks_friction() {
        let table = MethodTable::default();
        assert_eq!(
            table.get(MethodKey::new(
                GeometryKind::Smooth,
                Transfer::Heat,
                Side::Wf,
                Regime::TpEvap
            )),
            Some(Method::Huang)
        );
        assert!(
            table
                .require(GeometryKind::Smooth, Side::Wf, [Regime::TpEvap])
                .is_err()
        );
    }

    #[test]
    fn set_rejects_incompatible_method() {
        let mut table = MethodTable::default();
        let key = MethodKey::new(GeometryKind::Chevron, Transfer::Heat, Side::Wf, Regime::Liq);
        assert!(table.set(key, Method::ManglikBergles).is_err());
        let cond = MethodKey::new(GeometryKind::Chevron, Transfer::Heat, Side::Wf, Regime::TpEvap);
        assert!(table.set(cond, Method::HanLeeKim).is_err());
    }

    #[test]
    fn overrides_clear_and_replace() {
        let mut table = MethodTable::default();
        let key = MethodKey::new(GeometryKind::Chevron, Transfer::Heat, Side::Wf, Regime::TpCond);
        table
            .apply(&[MethodEntry { key, method: None }])
            .unwrap();
        assert!(table.resolve(key).is_err());
        table
            .apply(&[MethodEntry {
                key,
                method: Some(Method::HanLeeKim),
            }])
            .unwrap();
        assert_eq!(table.resolve(key).unwrap(), Method::HanLeeKim);
    }
}
