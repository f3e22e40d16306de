//! Test double for the store under verification
//!
//! `SimulatedTtlBackend` is a clock-driven in-memory TTL store covering all
//! four state shapes. It exists so the end-to-end tests have something to
//! verify; the crate itself never implements a store. The `leaky`
//! constructor builds a deliberately broken variant that keeps values past
//! their TTL, which the pipeline must flag.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use vigil::{
    Clock, Error, Result, StateBackend, StateDescriptor, StateShape, TtlStateHandle, Value,
};

enum ShapeState {
    Value(Option<(Value, u64)>),
    List(Vec<(Value, u64)>),
    Map(BTreeMap<String, (Value, u64)>),
    Aggregate(Option<(i64, u64)>),
}

impl ShapeState {
    fn empty(shape: StateShape) -> Self {
        match shape {
            StateShape::Value => ShapeState::Value(None),
            StateShape::List => ShapeState::List(Vec::new()),
            StateShape::Map => ShapeState::Map(BTreeMap::new()),
            StateShape::Aggregate => ShapeState::Aggregate(None),
        }
    }
}

type SharedState = Arc<Mutex<ShapeState>>;

struct SimulatedHandle {
    state: SharedState,
    clock: Arc<dyn Clock>,
    ttl_millis: u64,
    leaky: bool,
}

impl SimulatedHandle {
    fn alive(&self, written_at: u64, now: u64) -> bool {
        self.leaky || written_at + self.ttl_millis >= now
    }
}

impl TtlStateHandle for SimulatedHandle {
    fn read(&mut self) -> Result<Value> {
        let now = self.clock.now().as_millis();
        let mut state = self.state.lock();
        match &mut *state {
            ShapeState::Value(cell) => {
                if let Some((_, written_at)) = cell {
                    if !self.alive(*written_at, now) {
                        *cell = None;
                    }
                }
                Ok(cell.as_ref().map(|(v, _)| v.clone()).unwrap_or(Value::Null))
            }
            ShapeState::List(items) => {
                let ttl = self.ttl_millis;
                let leaky = self.leaky;
                items.retain(|(_, written_at)| leaky || written_at + ttl >= now);
                Ok(Value::Array(items.iter().map(|(v, _)| v.clone()).collect()))
            }
            ShapeState::Map(entries) => {
                let ttl = self.ttl_millis;
                let leaky = self.leaky;
                entries.retain(|_, (_, written_at)| leaky || *written_at + ttl >= now);
                Ok(Value::Object(
                    entries
                        .iter()
                        .map(|(k, (v, _))| (k.clone(), v.clone()))
                        .collect(),
                ))
            }
            ShapeState::Aggregate(cell) => {
                if let Some((_, written_at)) = cell {
                    if !self.alive(*written_at, now) {
                        *cell = None;
                    }
                }
                Ok(cell.map(|(sum, _)| Value::Int(sum)).unwrap_or(Value::Null))
            }
        }
    }

    fn apply(&mut self, update: &Value) -> Result<()> {
        let now = self.clock.now().as_millis();
        let mut state = self.state.lock();
        match &mut *state {
            ShapeState::Value(cell) => {
                *cell = Some((update.clone(), now));
            }
            ShapeState::List(items) => {
                items.push((update.clone(), now));
            }
            ShapeState::Map(entries) => {
                let payload = update
                    .as_object()
                    .ok_or_else(|| Error::InvalidOperation("map update must be an object".into()))?;
                let key = payload
                    .get("key")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::InvalidOperation("map update needs a string key".into()))?;
                let value = payload
                    .get("value")
                    .ok_or_else(|| Error::InvalidOperation("map update needs a value".into()))?;
                entries.insert(key.to_string(), (value.clone(), now));
            }
            ShapeState::Aggregate(cell) => {
                let add = update
                    .as_int()
                    .ok_or_else(|| Error::InvalidOperation("aggregate update must be an int".into()))?;
                let base = match cell {
                    Some((sum, written_at)) if self.leaky || *written_at + self.ttl_millis >= now => {
                        *sum
                    }
                    _ => 0,
                };
                *cell = Some((base + add, now));
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        let shape = match &*state {
            ShapeState::Value(_) => StateShape::Value,
            ShapeState::List(_) => StateShape::List,
            ShapeState::Map(_) => StateShape::Map,
            ShapeState::Aggregate(_) => StateShape::Aggregate,
        };
        *state = ShapeState::empty(shape);
        Ok(())
    }
}

/// In-memory TTL store double for all four shapes
pub struct SimulatedTtlBackend {
    clock: Arc<dyn Clock>,
    leaky: bool,
    states: Mutex<HashMap<(String, String), SharedState>>,
}

impl SimulatedTtlBackend {
    /// A store that enforces its TTL faithfully
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            leaky: false,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// A broken store that keeps values past their TTL
    pub fn leaky(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            leaky: true,
            states: Mutex::new(HashMap::new()),
        }
    }
}

impl StateBackend for SimulatedTtlBackend {
    fn create_state(&self, descriptor: &StateDescriptor) -> Result<Box<dyn TtlStateHandle>> {
        let mut states = self.states.lock();
        let state = states
            .entry((descriptor.key.clone(), descriptor.name.clone()))
            .or_insert_with(|| Arc::new(Mutex::new(ShapeState::empty(descriptor.shape))))
            .clone();
        Ok(Box::new(SimulatedHandle {
            state,
            clock: self.clock.clone(),
            ttl_millis: descriptor.ttl.as_millis() as u64,
            leaky: self.leaky,
        }))
    }
}
