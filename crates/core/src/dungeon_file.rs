//! Binary dungeon save format.
//!
//! Layout, all multi-byte integers big-endian:
//! - 12-byte ASCII marker `RLG327-S2025`, `u32` version (always 0), `u32` total file size.
//! - `u8` player x, `u8` player y.
//! - 80x21 hardness bytes, y outer and x inner. Hardness 0 loads as Hall, anything else as Stone.
//! - `u16` room count, then `u8` x0, y0, width, height per room.
//! - `u16` up staircase count with `u8` x, y pairs, then the same for down staircases.
//!
//! The size field is written but only required to be present on load.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::dungeon::{Dungeon, Room};
use crate::error::DungeonFileError;
use crate::types::{CellKind, Pos};

pub const FILE_MARKER: &[u8; 12] = b"RLG327-S2025";
pub const FILE_VERSION: u32 = 0;
pub const FILE_WIDTH: usize = 80;
pub const FILE_HEIGHT: usize = 21;

/// Marker, version, size, player position, hardness matrix, and the three counts.
const FIXED_SIZE: usize = FILE_MARKER.len() + 4 + 4 + 2 + FILE_WIDTH * FILE_HEIGHT + 2 + 2 + 2;

/// A dungeon as stored on disk, plus where the player stood.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedDungeon {
    pub dungeon: Dungeon,
    pub player: Pos,
}

pub fn load_dungeon_from_file(path: &Path) -> Result<SavedDungeon, DungeonFileError> {
    let file = File::open(path)?;
    read_dungeon(&mut BufReader::new(file))
}

pub fn save_dungeon_to_file(
    path: &Path,
    dungeon: &Dungeon,
    player: Pos,
) -> Result<(), DungeonFileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_dungeon(&mut writer, dungeon, player)?;
    writer.flush()?;
    Ok(())
}

pub fn read_dungeon<R: Read>(reader: &mut R) -> Result<SavedDungeon, DungeonFileError> {
    let mut marker = [0u8; 12];
    read_bytes(reader, &mut marker, "file marker")?;
    if &marker != FILE_MARKER {
        return Err(DungeonFileError::BadHeader);
    }
    let version = read_u32(reader, "version")?;
    if version != FILE_VERSION {
        return Err(DungeonFileError::UnsupportedVersion { found: version });
    }
    let size = read_u32(reader, "file size")?;
    let player = read_pos(reader, "player")?;

    let mut dungeon = Dungeon::new(FILE_WIDTH, FILE_HEIGHT);
    let mut matrix = vec![0u8; FILE_WIDTH * FILE_HEIGHT];
    read_bytes(reader, &mut matrix, "hardness matrix")?;
    for (pos, &hardness) in dungeon.positions().zip(&matrix) {
        if hardness == 0 {
            dungeon.carve(pos, CellKind::Hall);
        } else {
            dungeon.set_stone(pos, hardness);
        }
    }
    dungeon.seal_border();

    let room_count = read_u16(reader, "room count")?;
    for _ in 0..room_count {
        let mut fields = [0u8; 4];
        read_bytes(reader, &mut fields, "room")?;
        let [x0, y0, width, height] = fields.map(i32::from);
        if width == 0 || height == 0 {
            return Err(DungeonFileError::OutOfBounds { field: "room", x: x0, y: y0 });
        }
        let room = Room::from_size(x0, y0, width, height);
        for corner in [Pos { y: room.y0, x: room.x0 }, Pos { y: room.y1, x: room.x1 }] {
            check_interior(&dungeon, corner, "room")?;
        }
        dungeon.add_room(room);
    }

    for (kind, count_field, field) in [
        (CellKind::UpStairs, "up staircase count", "up staircase"),
        (CellKind::DownStairs, "down staircase count", "down staircase"),
    ] {
        let count = read_u16(reader, count_field)?;
        for _ in 0..count {
            let pos = read_pos(reader, field)?;
            check_interior(&dungeon, pos, field)?;
            dungeon.carve(pos, kind);
        }
    }

    check_interior(&dungeon, player, "player")?;
    if !dungeon.is_passable(player) {
        log::warn!("saved player position {player:?} is stone; opening it as hall");
        dungeon.carve(player, CellKind::Hall);
    }

    log::debug!(
        "loaded dungeon: declared size {size}, {room_count} rooms, player at {player:?}"
    );
    Ok(SavedDungeon { dungeon, player })
}

pub fn write_dungeon<W: Write>(
    writer: &mut W,
    dungeon: &Dungeon,
    player: Pos,
) -> Result<(), DungeonFileError> {
    if dungeon.width() != FILE_WIDTH || dungeon.height() != FILE_HEIGHT {
        return Err(DungeonFileError::DimensionMismatch {
            width: dungeon.width(),
            height: dungeon.height(),
            expected_width: FILE_WIDTH,
            expected_height: FILE_HEIGHT,
        });
    }

    let rooms = dungeon.rooms();
    let up = dungeon.staircases(CellKind::UpStairs);
    let down = dungeon.staircases(CellKind::DownStairs);
    let room_count = count_u16(rooms.len(), "rooms")?;
    let up_count = count_u16(up.len(), "up staircases")?;
    let down_count = count_u16(down.len(), "down staircases")?;
    let size = FIXED_SIZE + 4 * rooms.len() + 2 * up.len() + 2 * down.len();
    let size = u32::try_from(size).map_err(|_| DungeonFileError::Overflow { field: "file size" })?;

    writer.write_all(FILE_MARKER)?;
    writer.write_all(&FILE_VERSION.to_be_bytes())?;
    writer.write_all(&size.to_be_bytes())?;
    writer.write_all(&pos_bytes(player, "player")?)?;
    writer.write_all(&dungeon.hardness_matrix())?;

    writer.write_all(&room_count.to_be_bytes())?;
    for room in rooms {
        let fields = [room.x0, room.y0, room.width(), room.height()];
        let mut bytes = [0u8; 4];
        for (byte, value) in bytes.iter_mut().zip(fields) {
            *byte = u8::try_from(value)
                .map_err(|_| DungeonFileError::OutOfBounds { field: "room", x: room.x0, y: room.y0 })?;
        }
        writer.write_all(&bytes)?;
    }

    for (count, stairs, field) in
        [(up_count, &up, "up staircase"), (down_count, &down, "down staircase")]
    {
        writer.write_all(&count.to_be_bytes())?;
        for &pos in stairs.iter() {
            writer.write_all(&pos_bytes(pos, field)?)?;
        }
    }
    Ok(())
}

fn read_bytes<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    field: &'static str,
) -> Result<(), DungeonFileError> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => DungeonFileError::Truncated { field },
        _ => DungeonFileError::Io(err),
    })
}

fn read_u16<R: Read>(reader: &mut R, field: &'static str) -> Result<u16, DungeonFileError> {
    let mut buf = [0u8; 2];
    read_bytes(reader, &mut buf, field)?;
    Ok(u16::from_be_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R, field: &'static str) -> Result<u32, DungeonFileError> {
    let mut buf = [0u8; 4];
    read_bytes(reader, &mut buf, field)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_pos<R: Read>(reader: &mut R, field: &'static str) -> Result<Pos, DungeonFileError> {
    let mut buf = [0u8; 2];
    read_bytes(reader, &mut buf, field)?;
    Ok(Pos { y: i32::from(buf[1]), x: i32::from(buf[0]) })
}

fn check_interior(dungeon: &Dungeon, pos: Pos, field: &'static str) -> Result<(), DungeonFileError> {
    if dungeon.in_bounds(pos) && !dungeon.is_border(pos) {
        Ok(())
    } else {
        Err(DungeonFileError::OutOfBounds { field, x: pos.x, y: pos.y })
    }
}

fn pos_bytes(pos: Pos, field: &'static str) -> Result<[u8; 2], DungeonFileError> {
    match (u8::try_from(pos.x), u8::try_from(pos.y)) {
        (Ok(x), Ok(y)) => Ok([x, y]),
        _ => Err(DungeonFileError::OutOfBounds { field, x: pos.x, y: pos.y }),
    }
}

fn count_u16(len: usize, field: &'static str) -> Result<u16, DungeonFileError> {
    u16::try_from(len).map_err(|_| DungeonFileError::Overflow { field })
}
