use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;

/// A bus owned by the board and shared by every driver that sits on it.
pub type SharedBus<BUS> = Mutex<NoopRawMutex, BUS>;

/// Resources addressable on the board. `Null` never resolves to a handle.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceId {
    Null = 0,
    I2c0 = 1,
    Spi2 = 2,
}

impl ResourceId {
    pub const COUNT: usize = 3;
    pub const ALL: [ResourceId; ResourceId::COUNT] = [ResourceId::Null, ResourceId::I2c0, ResourceId::Spi2];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for ResourceId {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ResourceId::Null),
            1 => Ok(ResourceId::I2c0),
            2 => Ok(ResourceId::Spi2),
            other => Err(other),
        }
    }
}

pub(crate) enum Resource<I2C, SPI> {
    I2c(SharedBus<I2C>),
    Spi(SharedBus<SPI>),
}

/// Borrowed view of an initialized resource.
pub enum Handle<'a, I2C, SPI> {
    I2c(&'a SharedBus<I2C>),
    Spi(&'a SharedBus<SPI>),
}

impl<'a, I2C, SPI> Handle<'a, I2C, SPI> {
    pub fn as_i2c(&self) -> Option<&'a SharedBus<I2C>> {
        match *self {
            Handle::I2c(bus) => Some(bus),
            Handle::Spi(_) => None,
        }
    }

    pub fn as_spi(&self) -> Option<&'a SharedBus<SPI>> {
        match *self {
            Handle::Spi(bus) => Some(bus),
            Handle::I2c(_) => None,
        }
    }
}

/// Fixed handle table indexed by `ResourceId`.
pub(crate) struct ResourceTable<I2C, SPI> {
    slots: [Option<Resource<I2C, SPI>>; ResourceId::COUNT],
}

impl<I2C, SPI> ResourceTable<I2C, SPI> {
    pub(crate) const fn new() -> Self {
        Self { slots: [None, None, None] }
    }

    pub(crate) fn insert(&mut self, id: ResourceId, resource: Resource<I2C, SPI>) {
        if id != ResourceId::Null {
            self.slots[id.index()] = Some(resource);
        }
    }

    pub(crate) fn take(&mut self, id: ResourceId) -> Option<Resource<I2C, SPI>> {
        self.slots[id.index()].take()
    }

    pub(crate) fn get(&self, id: ResourceId) -> Option<Handle<'_, I2C, SPI>> {
        match self.slots[id.index()].as_ref()? {
            Resource::I2c(bus) => Some(Handle::I2c(bus)),
            Resource::Spi(bus) => Some(Handle::Spi(bus)),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_ids_round_trip_through_the_closed_set() {
        for id in ResourceId::ALL {
            assert_eq!(ResourceId::try_from(id as u8), Ok(id));
        }
        assert_eq!(ResourceId::try_from(3), Err(3));
        assert_eq!(ResourceId::try_from(0xff), Err(0xff));
    }

    #[test]
    fn null_slot_is_never_populated() {
        let mut table: ResourceTable<u8, u16> = ResourceTable::new();
        table.insert(ResourceId::Null, Resource::I2c(SharedBus::new(7)));
        assert!(table.get(ResourceId::Null).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn handles_are_typed_by_bus() {
        let mut table: ResourceTable<u8, u16> = ResourceTable::new();
        table.insert(ResourceId::I2c0, Resource::I2c(SharedBus::new(7)));
        table.insert(ResourceId::Spi2, Resource::Spi(SharedBus::new(9)));

        let i2c = table.get(ResourceId::I2c0).unwrap();
        assert!(i2c.as_spi().is_none());
        assert_eq!(*i2c.as_i2c().unwrap().try_lock().unwrap(), 7);

        let spi = table.get(ResourceId::Spi2).unwrap();
        assert!(spi.as_i2c().is_none());
        assert_eq!(*spi.as_spi().unwrap().try_lock().unwrap(), 9);

        assert!(table.take(ResourceId::I2c0).is_some());
        assert!(table.get(ResourceId::I2c0).is_none());
        assert!(!table.is_empty());
    }
}
