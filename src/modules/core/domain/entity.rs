//! Entity trait and the tagged object envelope used by storage

use chrono::{NaiveDateTime, SubsecRound};
use hbnb_types::Kind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Amenity, City, Place, State, User};

/// Any stored object, tagged with its class name.
///
/// Serializes to the entity dict: every field plus `"__class__": "<Class>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Object {
    Amenity(Amenity),
    City(City),
    Place(Place),
    State(State),
    User(User),
}

impl Object {
    /// Kind of the wrapped entity
    pub fn kind(&self) -> Kind {
        match self {
            Object::Amenity(_) => Kind::Amenity,
            Object::City(_) => Kind::City,
            Object::Place(_) => Kind::Place,
            Object::State(_) => Kind::State,
            Object::User(_) => Kind::User,
        }
    }

    /// Id of the wrapped entity
    pub fn id(&self) -> &str {
        match self {
            Object::Amenity(a) => &a.id,
            Object::City(c) => &c.id,
            Object::Place(p) => &p.id,
            Object::State(s) => &s.id,
            Object::User(u) => &u.id,
        }
    }

    /// Dict representation returned by the API and written by file storage
    pub fn to_dict(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A concrete entity type that can travel through [`Object`]
pub trait Entity: Clone + Send + Sync + Sized + 'static {
    /// Storage kind of this entity
    const KIND: Kind;

    fn id(&self) -> &str;

    /// Refresh `updated_at`, as done before every save
    fn touch(&mut self);

    fn into_object(self) -> Object;

    fn from_object(object: Object) -> Option<Self>;

    fn to_dict(&self) -> Value {
        self.clone().into_object().to_dict()
    }
}

macro_rules! impl_entity {
    ($ty:ident) => {
        impl Entity for $ty {
            const KIND: Kind = Kind::$ty;

            fn id(&self) -> &str {
                &self.id
            }

            fn touch(&mut self) {
                self.updated_at = now();
            }

            fn into_object(self) -> Object {
                Object::$ty(self)
            }

            fn from_object(object: Object) -> Option<Self> {
                match object {
                    Object::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Object {
            fn from(value: $ty) -> Self {
                Object::$ty(value)
            }
        }
    };
}

impl_entity!(Amenity);
impl_entity!(City);
impl_entity!(Place);
impl_entity!(State);
impl_entity!(User);

/// Current naive UTC time, at the microsecond precision of the dict format
pub(crate) fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc().trunc_subsecs(6)
}

/// Fresh id plus matching `created_at`/`updated_at`
pub(crate) fn identity() -> (String, NaiveDateTime) {
    (uuid::Uuid::new_v4().to_string(), now())
}
