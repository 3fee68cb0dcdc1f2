// src/dungeon/src/level/tiles.rs
use combat::{Terrain, VisionSystem};
use items::Color;
use serde::{Deserialize, Serialize};

/// 表示游戏中的一个地图格子
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// 是否可通行
    pub walkable: bool,
    /// 是否透光(影响FOV计算)
    pub transparent: bool,
    pub glyph: char,
    pub color: Color,
    /// 是否已被探索过(一旦为真永不重置)
    pub explored: bool,
    /// 当前是否可见(每回合重新计算)
    pub visible: bool,
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            walkable: false,
            transparent: false,
            glyph: '#',
            color: (100, 100, 100),
            explored: false,
            visible: false,
        }
    }

    pub fn floor() -> Self {
        Self {
            walkable: true,
            transparent: true,
            glyph: '.',
            color: (64, 64, 64),
            explored: false,
            visible: false,
        }
    }
}

/// Fixed-size tile grid, row-major. Owns every tile of a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord", into = "GridRecord")]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

/// Wire shape of a [`Grid`]; the tile count is checked on the way in.
#[derive(Serialize, Deserialize)]
struct GridRecord {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = String;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        Grid::from_tiles(record.width, record.height, record.tiles).ok_or_else(|| {
            format!(
                "grid of {}x{} needs {} tiles",
                record.width,
                record.height,
                record.width.max(0) as i64 * record.height.max(0) as i64
            )
        })
    }
}

impl From<Grid> for GridRecord {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            tiles: grid.tiles,
        }
    }
}

impl Grid {
    /// 初始化所有瓦片为墙壁
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
        }
    }

    /// Rebuilds a grid from row-major tiles; `None` when the count is wrong.
    pub fn from_tiles(width: i32, height: i32, tiles: Vec<Tile>) -> Option<Self> {
        if width < 0 || height < 0 || tiles.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| (y * self.width + x) as usize)
    }

    /// 获取指定位置的瓦片，越界返回 None
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.index(x, y).map(move |i| &mut self.tiles[i])
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.visible)
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.explored)
    }

    /// 将格子挖成地板(越界忽略)
    pub fn carve(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            *tile = Tile::floor();
        }
    }

    pub fn carve_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        for ty in y..y + height {
            for tx in x..x + width {
                self.carve(tx, ty);
            }
        }
    }

    pub fn carve_horizontal(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve(x, y);
        }
    }

    pub fn carve_vertical(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve(x, y);
        }
    }

    pub fn reset_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// 更新可见区域(基于视野半径和视线)
    ///
    /// Every tile inside the bounding square whose Euclidean distance is at
    /// most `radius` and whose traced line from `origin` is unobstructed
    /// becomes visible and explored. Returns the number of visible tiles.
    pub fn compute_field_of_view(&mut self, origin: (i32, i32), radius: u32) -> usize {
        self.reset_visibility();

        let r = radius as i32;
        let (ox, oy) = origin;
        let mut lit = Vec::new();
        for y in (oy - r).max(0)..=(oy + r).min(self.height - 1) {
            for x in (ox - r).max(0)..=(ox + r).min(self.width - 1) {
                if VisionSystem::within_radius(origin, (x, y), radius)
                    && VisionSystem::has_line_of_sight(self, origin, (x, y))
                {
                    lit.push((x, y));
                }
            }
        }

        for &(x, y) in &lit {
            if let Some(tile) = self.get_tile_mut(x, y) {
                tile.visible = true;
                tile.explored = true;
            }
        }
        lit.len()
    }
}

impl Terrain for Grid {
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.walkable)
    }

    fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.transparent)
    }
}
