mod tests {
    use myrtio_touch_dimmer::persistence::{LEVEL_RECORD_SIZE, decode_level, encode_level};
    use myrtio_touch_dimmer::{LevelStore, SettledListener, StorageDriver, StorageError};

    struct MemoryStorage {
        data: [u8; LEVEL_RECORD_SIZE],
        writes: usize,
        fail: bool,
    }

    impl MemoryStorage {
        fn erased() -> Self {
            Self {
                data: [0xFF; LEVEL_RECORD_SIZE],
                writes: 0,
                fail: false,
            }
        }
    }

    impl StorageDriver for MemoryStorage {
        fn read(&mut self, buffer: &mut [u8]) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::DriverError);
            }
            buffer.copy_from_slice(&self.data);
            Ok(())
        }

        fn write(&mut self, buffer: &[u8]) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::DriverError);
            }
            self.data.copy_from_slice(buffer);
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_level_record_layout() {
        assert_eq!(encode_level(100), [100, 0]);
        assert_eq!(decode_level([55, 0]), Ok(55));
        assert_eq!(decode_level([101, 0]), Err(StorageError::InvalidData));
        assert_eq!(decode_level([50, 1]), Err(StorageError::InvalidData));
    }

    #[test]
    fn test_erased_storage_defaults_to_off() {
        let mut store = LevelStore::new(MemoryStorage::erased());
        assert_eq!(store.load(), Err(StorageError::InvalidData));
        assert_eq!(store.load_or_default(), 0);
        assert_eq!(store.stored(), None);
    }

    #[test]
    fn test_driver_failure_defaults_to_off() {
        let mut storage = MemoryStorage::erased();
        storage.fail = true;
        let mut store = LevelStore::new(storage);
        assert_eq!(store.load(), Err(StorageError::DriverError));
        assert_eq!(store.load_or_default(), 0);
        assert_eq!(store.save(10), Err(StorageError::DriverError));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = LevelStore::new(MemoryStorage::erased());
        store.save(73).unwrap();
        assert_eq!(store.driver().data, [73, 0]);
        assert_eq!(store.load(), Ok(73));
    }

    #[test]
    fn test_unchanged_level_is_not_rewritten() {
        let mut storage = MemoryStorage::erased();
        storage.data = [30, 0];
        let mut store = LevelStore::new(storage);
        assert_eq!(store.load(), Ok(30));

        store.save(30).unwrap();
        assert_eq!(store.driver().writes, 0);

        store.save(31).unwrap();
        store.save(31).unwrap();
        assert_eq!(store.driver().writes, 1);
    }

    #[test]
    fn test_settled_listener_persists_effective_level() {
        let mut store = LevelStore::new(MemoryStorage::erased());
        store.on_settled(64, true);
        assert_eq!(store.stored(), Some(64));

        store.on_settled(64, false);
        assert_eq!(store.stored(), Some(0));
        assert_eq!(store.driver().writes, 2);
    }
}
