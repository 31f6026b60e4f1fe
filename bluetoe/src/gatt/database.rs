//! The flattened attribute table.

use {
    super::{AttributeList, NotificationData, Origin, ValueId},
    crate::{
        att::{Attribute, AttributeProvider},
        Error,
    },
    heapless::Vec,
};

/// A flattened, handle-addressed attribute table.
///
/// Built once from a list of services. Every attribute is resolved when the database is created,
/// so looking up a handle is a plain array access. `N` is the capacity of the table.
///
/// The database borrows the services and, through them, the values bound to characteristics.
/// Those values live in `Cell`s, so the database is not `Sync`: updating a value from an
/// interrupt while an access is running requires a critical section around both.
pub struct Database<'a, L: ?Sized, const N: usize> {
    services: &'a L,
    attributes: Vec<Attribute<'a>, N>,
    client_configs: usize,
}

impl<'a, L: AttributeList + ?Sized, const N: usize> Database<'a, L, N> {
    /// Flattens `services` into a new attribute table.
    ///
    /// Fails if the services describe more attributes than the table can hold or than there are
    /// attribute handles.
    pub fn new(services: &'a L) -> Result<Self, Error> {
        let count = services.number_of_attributes();
        if count > usize::from(u16::max_value()) {
            warn!("{} attributes exceed the handle space", count);
            return Err(Error::HandleSpaceExhausted);
        }
        if count > N {
            warn!("{} attributes exceed the table capacity of {}", count, N);
            return Err(Error::TooManyAttributes);
        }

        let mut attributes = Vec::new();
        for index in 0..count {
            let attribute = services.attribute_at(index, Origin::START);
            trace!("{:?}", attribute);
            attributes
                .push(attribute)
                .map_err(|_| Error::TooManyAttributes)?;
        }

        let client_configs = services.number_of_client_configs();
        debug!(
            "attribute database: {} attributes, {} client configurations",
            count, client_configs
        );

        Ok(Self {
            services,
            attributes,
            client_configs,
        })
    }

    /// Returns the services the database was built from.
    pub fn services(&self) -> &'a L {
        self.services
    }

    /// Returns all attributes, ordered by handle.
    pub fn attributes(&self) -> &[Attribute<'a>] {
        &self.attributes
    }
}

impl<L: AttributeList + ?Sized, const N: usize> AttributeProvider for Database<'_, L, N> {
    fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    fn number_of_client_configs(&self) -> usize {
        self.client_configs
    }

    fn attribute_at(&self, index: usize) -> Attribute<'_> {
        assert!(
            index < self.attributes.len(),
            "attribute index {} out of range",
            index
        );
        self.attributes[index]
    }

    fn find_notification_data(&self, value: ValueId) -> NotificationData<'_> {
        self.services.find_notification_data(value, Origin::START)
    }
}
