use rand::Rng;

use super::init_logger;
use super::sim_chip::{SimChip, ERASE_TICKS, PROGRAM_TICKS};
use crate::{command, Capacity, S25fl, S25flError, SECTOR_SIZE};

fn random_bytes(length: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen::<u8>()).collect()
}

#[test]
fn identify_chip() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);
    let id = flash.read_jedec_id();
    assert!(id.is_s25fl());
    assert_eq!(id.capacity, 0x17);
}

#[test]
fn write_read_across_pages() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    let data = random_bytes(1000);
    assert_eq!(flash.write(0x2_00F0, &data), data.len());

    let mut read_back = vec![0u8; data.len()];
    assert_eq!(flash.read(0x2_00F0, &mut read_back), data.len());
    assert_eq!(read_back, data);

    // 16 bytes up to the boundary, three full pages, then the rest
    assert_eq!(chip.programs, 5);
}

#[test]
fn write_read_at_end_of_device() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);
    let total_size = flash.total_size();

    let data = random_bytes(100);
    let address = total_size - 101;
    assert_eq!(flash.write(address, &data), 100);

    let mut read_back = vec![0u8; 200];
    assert_eq!(flash.read(address, &mut read_back), 101);
    assert_eq!(&read_back[..100], &data[..]);
    assert_eq!(read_back[100], 0xFF);
}

#[test]
fn program_only_clears_bits() {
    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.write_page(0x40, &[0xF0, 0x0F], false), 2);
    assert_eq!(flash.write_page(0x40, &[0x3C, 0x3C], false), 2);

    let mut read_back = [0u8; 2];
    flash.read(0x40, &mut read_back);
    assert_eq!(read_back, [0x30, 0x0C]);
}

#[test]
fn erase_then_rewrite_sector() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    let first = random_bytes(SECTOR_SIZE as usize);
    let address = 5 * SECTOR_SIZE;
    assert_eq!(flash.write(address, &first), first.len());
    // neighbours must survive the erase
    assert_eq!(flash.write(address - 4, &[0u8; 4]), 4);
    assert_eq!(flash.write(address + SECTOR_SIZE, &[0u8; 4]), 4);

    assert_eq!(flash.erase_sector(5), Ok(()));

    let mut read_back = vec![0u8; SECTOR_SIZE as usize + 8];
    flash.read(address - 4, &mut read_back);
    assert_eq!(&read_back[..4], &[0u8; 4]);
    assert!(read_back[4..4 + SECTOR_SIZE as usize].iter().all(|b| *b == 0xFF));
    assert_eq!(&read_back[4 + SECTOR_SIZE as usize..], &[0u8; 4]);

    let second = random_bytes(SECTOR_SIZE as usize);
    assert_eq!(flash.write(address, &second), second.len());
    let mut read_back = vec![0u8; SECTOR_SIZE as usize];
    flash.read(address, &mut read_back);
    assert_eq!(read_back, second);

    assert_eq!(chip.erases, vec![(command::SECTOR_ERASE_4K, address)]);
    assert!(!chip.busy());
    assert!(!chip.write_enabled());
}

#[test]
fn erase_waits_for_previous_program() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.write_page(0, &[0u8; 8], true), 8);
    assert!(flash.read_status().is_busy());
    assert_eq!(flash.erase_sector(0), Ok(()));

    let mut read_back = [0u8; 8];
    flash.read(0, &mut read_back);
    assert_eq!(read_back, [0xFF; 8]);
    // program busy time, then erase busy time, one unit per poll
    assert!(chip.elapsed >= PROGRAM_TICKS + ERASE_TICKS);
}

#[test]
fn fast_quit_needs_ready_wait() {
    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.write_page(0x100, &[0x11; 4], true), 4);
    // still programming, the next program is ignored by the chip
    assert_eq!(flash.write_page(0x104, &[0x22; 4], true), 4);
    assert_eq!(flash.wait_for_ready(command::READY_TIMEOUT), Ok(()));

    let mut read_back = [0u8; 8];
    flash.read(0x100, &mut read_back);
    assert_eq!(read_back, [0x11, 0x11, 0x11, 0x11, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(chip.programs, 1);
}

#[test]
fn erase_fails_on_protected_chip() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    chip.write_protected = true;
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.erase_sector(0), Err(S25flError::WriteEnableFailed));
    assert!(chip.erases.is_empty());
}

#[test]
fn erase_times_out_on_stuck_chip() {
    init_logger();

    let mut chip = SimChip::new(Capacity::S64Mb);
    chip.stuck_busy = true;
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.erase_sector(0), Err(S25flError::Timeout));
    assert_eq!(chip.elapsed, command::READY_TIMEOUT);
}

#[test]
fn block_erase_clears_whole_block() {
    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    let block = 0x1_0000;
    assert_eq!(flash.write(block + 0x8000, &[0u8; 300]), 300);
    assert_eq!(flash.write(block + 0xFFF0, &[0u8; 16]), 16);
    assert_eq!(flash.erase_block_64k(1), Ok(()));

    let mut read_back = vec![0u8; 0x1_0000];
    assert_eq!(flash.read(block, &mut read_back), read_back.len());
    assert!(read_back.iter().all(|b| *b == 0xFF));
}

#[test]
fn chip_erase() {
    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    assert_eq!(flash.write(0x10, &[0u8; 4]), 4);
    assert_eq!(flash.write(0x70_0000, &[0u8; 4]), 4);
    assert_eq!(flash.erase_chip(), Ok(()));
    assert!(chip.memory.iter().all(|b| *b == 0xFF));
}

#[test]
fn powered_down_chip_ignores_commands() {
    let mut chip = SimChip::new(Capacity::S64Mb);
    let mut flash = S25fl::new(&mut chip, Capacity::S64Mb);

    flash.power_down();
    assert_eq!(flash.read_device_id(), 0);
    flash.release_power_down();
    assert!(flash.read_jedec_id().is_s25fl());
    assert!(!chip.powered_down);
}
