use stickers::{Entity, InMemoryDataAccessor};

#[derive(Clone, Debug, PartialEq)]
pub struct Named {
    pub id: i32,
    pub name: String,
}

impl Named {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
        }
    }
}

impl Entity for Named {
    const KIND: &'static str = "named";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub id: i32,
    pub text: String,
}

impl Entity for Label {
    const KIND: &'static str = "label";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// `Test1..=TestN` with identifiers `1..=N`.
pub fn entities(count: i32) -> Vec<Named> {
    (1..=count)
        .map(|i| Named {
            id: i,
            name: format!("Test{}", i),
        })
        .collect()
}

pub fn seeded(count: i32) -> InMemoryDataAccessor {
    InMemoryDataAccessor::with_entities(entities(count)).unwrap()
}

pub fn names(items: &[Named]) -> Vec<&str> {
    items.iter().map(|n| n.name.as_str()).collect()
}
