use crate::backend::GenerativeBackend;
use crate::model::ModelSlot;

#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub backend: &'a dyn GenerativeBackend,
    pub model_slot: &'a ModelSlot,
}
