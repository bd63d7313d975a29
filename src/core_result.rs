use justerror::Error;

pub type CoreResult<T = ()> = Result<T, CoreError>;

#[Error]
#[derive(Eq, PartialEq)]
pub enum CoreError {
    Entity(#[from] EntityError),
    Component(#[from] ComponentError),
}

#[Error]
#[derive(Eq, PartialEq)]
pub enum ComponentError {
    NotRegistered {
        component_type: String,
    },
    TypeConflict {
        component_type: String,
        registered: &'static str,
        requested: &'static str,
    },
}

#[Error]
#[derive(Eq, PartialEq)]
pub enum EntityError {
    NotRegistered,
    AlreadyRegistered,
}
