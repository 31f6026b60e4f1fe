//! Composition of attribute lists.
//!
//! Services and characteristics are nested lists of attributes. A list knows how many attributes
//! and client configuration slots it contributes and resolves a position inside itself to an
//! attribute. Handles and slots are assigned by concatenation order: a list starts where its
//! predecessor ends, which is tracked by an [`Origin`].
//!
//! Heterogeneous lists are tuples, homogeneous ones are arrays or slices.
//!
//! [`Origin`]: struct.Origin.html

use {
    super::{NotificationData, ValueId},
    crate::att::{Attribute, Handle},
};

/// Handle and client configuration slot of the first attribute of a list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Origin {
    pub first_handle: Handle,
    pub first_client_config: usize,
}

impl Origin {
    /// Origin of a whole database.
    pub const START: Self = Origin {
        first_handle: Handle::FIRST,
        first_client_config: 0,
    };

    /// Returns the origin of the list following `list`, if `list` starts at `self`.
    pub fn advance<L: AttributeList + ?Sized>(self, list: &L) -> Self {
        Origin {
            first_handle: self.handle_at(list.number_of_attributes()),
            first_client_config: self.first_client_config + list.number_of_client_configs(),
        }
    }

    /// Skips `count` attributes that have no client configuration slot.
    pub fn skip(self, count: usize) -> Self {
        Origin {
            first_handle: self.handle_at(count),
            ..self
        }
    }

    /// Handle of the attribute at `index` relative to this origin.
    pub fn handle_at(&self, index: usize) -> Handle {
        self.first_handle.offset(index)
    }
}

/// A list of attributes with a fixed shape.
pub trait AttributeList {
    /// Number of attributes in the list.
    fn number_of_attributes(&self) -> usize;

    /// Number of client configuration slots used by the list.
    fn number_of_client_configs(&self) -> usize;

    /// Returns the attribute at `index` in this list, which starts at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `number_of_attributes()`.
    fn attribute_at(&self, index: usize, origin: Origin) -> Attribute<'_>;

    /// Locates the notifying or indicating characteristic bound to `value` in this list, which
    /// starts at `origin`.
    fn find_notification_data(&self, value: ValueId, origin: Origin) -> NotificationData<'_>;
}

impl<T: AttributeList + ?Sized> AttributeList for &'_ T {
    fn number_of_attributes(&self) -> usize {
        (**self).number_of_attributes()
    }

    fn number_of_client_configs(&self) -> usize {
        (**self).number_of_client_configs()
    }

    fn attribute_at(&self, index: usize, origin: Origin) -> Attribute<'_> {
        (**self).attribute_at(index, origin)
    }

    fn find_notification_data(&self, value: ValueId, origin: Origin) -> NotificationData<'_> {
        (**self).find_notification_data(value, origin)
    }
}

impl<T: AttributeList> AttributeList for [T] {
    fn number_of_attributes(&self) -> usize {
        self.iter().map(T::number_of_attributes).sum()
    }

    fn number_of_client_configs(&self) -> usize {
        self.iter().map(T::number_of_client_configs).sum()
    }

    fn attribute_at(&self, mut index: usize, mut origin: Origin) -> Attribute<'_> {
        for item in self {
            let count = item.number_of_attributes();
            if index < count {
                return item.attribute_at(index, origin);
            }
            index -= count;
            origin = origin.advance(item);
        }

        panic!("attribute index out of range");
    }

    fn find_notification_data(&self, value: ValueId, mut origin: Origin) -> NotificationData<'_> {
        for item in self {
            let data = item.find_notification_data(value, origin);
            if data.is_valid() {
                return data;
            }
            origin = origin.advance(item);
        }

        NotificationData::invalid()
    }
}

impl<T: AttributeList, const N: usize> AttributeList for [T; N] {
    fn number_of_attributes(&self) -> usize {
        self[..].number_of_attributes()
    }

    fn number_of_client_configs(&self) -> usize {
        self[..].number_of_client_configs()
    }

    fn attribute_at(&self, index: usize, origin: Origin) -> Attribute<'_> {
        self[..].attribute_at(index, origin)
    }

    fn find_notification_data(&self, value: ValueId, origin: Origin) -> NotificationData<'_> {
        self[..].find_notification_data(value, origin)
    }
}

impl AttributeList for () {
    fn number_of_attributes(&self) -> usize {
        0
    }

    fn number_of_client_configs(&self) -> usize {
        0
    }

    fn attribute_at(&self, _index: usize, _origin: Origin) -> Attribute<'_> {
        panic!("attribute index out of range");
    }

    fn find_notification_data(&self, _value: ValueId, _origin: Origin) -> NotificationData<'_> {
        NotificationData::invalid()
    }
}

macro_rules! tuple_attribute_list {
    ( $($name:ident)+ ) => {
        #[allow(non_snake_case)]
        impl<$($name: AttributeList),+> AttributeList for ($($name,)+) {
            fn number_of_attributes(&self) -> usize {
                let ($($name,)+) = self;
                0 $( + $name.number_of_attributes() )+
            }

            fn number_of_client_configs(&self) -> usize {
                let ($($name,)+) = self;
                0 $( + $name.number_of_client_configs() )+
            }

            #[allow(unused_assignments)]
            fn attribute_at(&self, mut index: usize, mut origin: Origin) -> Attribute<'_> {
                let ($($name,)+) = self;
                $(
                    let count = $name.number_of_attributes();
                    if index < count {
                        return $name.attribute_at(index, origin);
                    }
                    index -= count;
                    origin = origin.advance($name);
                )+

                panic!("attribute index out of range");
            }

            #[allow(unused_assignments)]
            fn find_notification_data(
                &self,
                value: ValueId,
                mut origin: Origin,
            ) -> NotificationData<'_> {
                let ($($name,)+) = self;
                $(
                    let data = $name.find_notification_data(value, origin);
                    if data.is_valid() {
                        return data;
                    }
                    origin = origin.advance($name);
                )+

                NotificationData::invalid()
            }
        }
    };
}

tuple_attribute_list!(A);
tuple_attribute_list!(A B);
tuple_attribute_list!(A B C);
tuple_attribute_list!(A B C D);
tuple_attribute_list!(A B C D E);
tuple_attribute_list!(A B C D E F);
tuple_attribute_list!(A B C D E F G);
tuple_attribute_list!(A B C D E F G H);
tuple_attribute_list!(A B C D E F G H I);
tuple_attribute_list!(A B C D E F G H I J);
tuple_attribute_list!(A B C D E F G H I J K);
tuple_attribute_list!(A B C D E F G H I J K L);
