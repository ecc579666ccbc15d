//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Curriculum module publication status.
    ModuleStatus {
        Draft = 1,
        Published = 2,
    }
}

define_status_enum! {
    /// Lesson publication status. Draft lessons are excluded from the
    /// module completion requirement.
    LessonStatus {
        Draft = 1,
        Published = 2,
    }
}

define_status_enum! {
    /// Training period lifecycle status.
    PeriodStatus {
        Active = 1,
        Completed = 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(ModuleStatus::Draft.id(), 1);
        assert_eq!(ModuleStatus::Published.id(), 2);
        assert_eq!(LessonStatus::Draft.id(), 1);
        assert_eq!(LessonStatus::Published.id(), 2);
        assert_eq!(PeriodStatus::Active.id(), 1);
        assert_eq!(PeriodStatus::Completed.id(), 2);
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = PeriodStatus::Active.into();
        assert_eq!(id, 1);
    }
}
