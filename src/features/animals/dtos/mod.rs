mod draft_dto;

pub use draft_dto::{
    content_type_from_file_name, Attachment, CreatedAnimal, DeleteOutcome, DraftRecord,
    DRAFT_FIELDS,
};
