//! Record types shared by the model integration tests.

#![allow(dead_code)]

use tillage_model::{Declaration, FieldDescriptor, Fields, Record, Result, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct Fertilizer {
    pub id: Option<i64>,
    pub name: String,
    pub amount: Option<i64>,
}

impl Fertilizer {
    pub fn new(name: &str, amount: i64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            amount: Some(amount),
        }
    }
}

impl Record for Fertilizer {
    fn declaration() -> Declaration {
        Declaration::new("Fertilizer").text(
            "name: charfield, max_length=100\n\
             amount: integerfield, min=0, max=1000",
        )
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "name" => self.name.as_str().into(),
            "amount" => self.amount.into(),
            _ => Value::Null,
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Fertilizer {
            id: Some(fields.id()),
            name: fields.require_text("name")?,
            amount: fields.integer("amount")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crop {
    pub id: Option<i64>,
    pub name: String,
    pub season: String,
    pub watering_frequency: Option<i64>,
}

impl Crop {
    pub fn new(name: &str, season: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            season: season.to_string(),
            watering_frequency: None,
        }
    }
}

impl Record for Crop {
    fn declaration() -> Declaration {
        Declaration::new("Crop")
            .text("name: charfield, max_length=50")
            .text("season: charfield, max_length=10, choices=spring,summer,autumn,winter")
            .field("watering_frequency", FieldDescriptor::integer().min(1).max(14))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "name" => self.name.as_str().into(),
            "season" => self.season.as_str().into(),
            "watering_frequency" => self.watering_frequency.into(),
            _ => Value::Null,
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Crop {
            id: Some(fields.id()),
            name: fields.require_text("name")?,
            season: fields.require_text("season")?,
            watering_frequency: fields.integer("watering_frequency")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bed {
    pub id: Option<i64>,
    pub crop_id: i64,
    pub fertilizer_id: Option<i64>,
}

impl Record for Bed {
    fn declaration() -> Declaration {
        Declaration::new("Bed")
            .field("crop_id", FieldDescriptor::foreign_key("crops"))
            .field("fertilizer_id", FieldDescriptor::foreign_key("fertilizers"))
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "crop_id" => self.crop_id.into(),
            "fertilizer_id" => self.fertilizer_id.into(),
            _ => Value::Null,
        }
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Bed {
            id: Some(fields.id()),
            crop_id: fields.require_integer("crop_id")?,
            fertilizer_id: fields.integer("fertilizer_id")?,
        })
    }
}
