use uuid::Uuid;

use crate::error::ApiError;

/// A resource whose mutation is gated on its recorded creator.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// The single ownership guard applied to every mutate-or-delete path.
///
/// Repos run conditional statements (`WHERE id = $1 AND owner = $2`), so the
/// mutation itself is atomic; this maps the outcome uniformly. A missing row
/// and a row owned by someone else are deliberately the same answer.
pub fn ensure_owner<T: Owned>(resource: Option<T>, user_id: Uuid) -> Result<T, ApiError> {
    match resource {
        Some(r) if r.owner_id() == user_id => Ok(r),
        _ => Err(ApiError::ForbiddenOrNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Note {
        author: Uuid,
    }

    impl Owned for Note {
        fn owner_id(&self) -> Uuid {
            self.author
        }
    }

    #[test]
    fn owner_passes_through() {
        let me = Uuid::new_v4();
        let note = Note { author: me };
        assert!(ensure_owner(Some(note), me).is_ok());
    }

    #[test]
    fn missing_and_foreign_are_indistinguishable() {
        let me = Uuid::new_v4();
        let missing = ensure_owner(None::<Note>, me).unwrap_err();
        let foreign = ensure_owner(
            Some(Note {
                author: Uuid::new_v4(),
            }),
            me,
        )
        .unwrap_err();
        assert_eq!(missing.to_string(), foreign.to_string());
        assert_eq!(missing.status(), foreign.status());
    }
}
