//! Test application and data builders

use std::io::Cursor;
use std::path::Path;

use tempfile::TempDir;

use blog_db::{create_memory_pool, run_migrations};
use blog_media::ImageStore;
use blog_service::{
    ArticleService, CommentService, LikeService, RegisterData, ServiceContext, UserService,
};

/// Password used by every fixture user
pub const PASSWORD: &str = "password123";

/// A fully wired application over an in-memory store and a temporary upload
/// directory. The directory lives as long as the `TestApp`.
pub struct TestApp {
    ctx: ServiceContext,
    upload_dir: TempDir,
}

impl TestApp {
    /// Spin up a migrated in-memory store with a fresh upload directory
    pub async fn spawn() -> Self {
        let pool = create_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let upload_dir = TempDir::new().unwrap();
        let ctx = ServiceContext::from_pool(pool, ImageStore::new(upload_dir.path()));

        Self { ctx, upload_dir }
    }

    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Root of the upload directory, for orphan-file assertions
    pub fn upload_root(&self) -> &Path {
        self.upload_dir.path()
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.ctx)
    }

    pub fn articles(&self) -> ArticleService<'_> {
        ArticleService::new(&self.ctx)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.ctx)
    }

    pub fn likes(&self) -> LikeService<'_> {
        LikeService::new(&self.ctx)
    }

    /// Count every stored image file under the upload root
    pub fn stored_file_count(&self) -> usize {
        fn walk(dir: &Path) -> usize {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return 0;
            };
            entries
                .flatten()
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() {
                        walk(&path)
                    } else {
                        1
                    }
                })
                .sum()
        }
        walk(self.upload_dir.path())
    }
}

/// A valid registration payload for `nickname`, with the fixture password
pub fn register_data(nickname: &str) -> RegisterData {
    RegisterData {
        name: "Test".to_string(),
        surname: "User".to_string(),
        nickname: nickname.to_string(),
        email: format!("{nickname}@example.com"),
        password: PASSWORD.to_string(),
        password_again: PASSWORD.to_string(),
        description: None,
    }
}

/// A small valid PNG payload
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 100, 50, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
