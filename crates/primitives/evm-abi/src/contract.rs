use std::collections::HashMap;

use primitive_types::H256;

use crate::{Event, Function, Selector};

/// Immutable lookup of a contract's functions and events.
///
/// Overloaded names resolve to the first definition, selectors and topics are exact.
#[derive(Clone, Debug, Default)]
pub struct Contract {
    functions: Vec<Function>,
    events: Vec<Event>,
    functions_by_name: HashMap<String, usize>,
    functions_by_selector: HashMap<Selector, usize>,
    events_by_name: HashMap<String, usize>,
    events_by_topic: HashMap<H256, usize>,
}

impl Contract {
    pub fn new(functions: Vec<Function>, events: Vec<Event>) -> Self {
        let mut functions_by_name = HashMap::new();
        let mut functions_by_selector = HashMap::new();
        for (i, function) in functions.iter().enumerate() {
            functions_by_name.entry(function.name.clone()).or_insert(i);
            functions_by_selector.entry(function.selector()).or_insert(i);
        }

        let mut events_by_name = HashMap::new();
        let mut events_by_topic = HashMap::new();
        for (i, event) in events.iter().enumerate() {
            events_by_name.entry(event.name.clone()).or_insert(i);
            if !event.anonymous {
                events_by_topic.entry(event.topic0()).or_insert(i);
            }
        }

        Self { functions, events, functions_by_name, functions_by_selector, events_by_name, events_by_topic }
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions_by_name.get(name).map(|i| &self.functions[*i])
    }

    pub fn function_by_selector(&self, selector: &Selector) -> Option<&Function> {
        self.functions_by_selector.get(selector).map(|i| &self.functions[*i])
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events_by_name.get(name).map(|i| &self.events[*i])
    }

    pub fn event_by_topic(&self, topic: &H256) -> Option<&Event> {
        self.events_by_topic.get(topic).map(|i| &self.events[*i])
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
