use gallery_html::run;
use shared_utils::SiteConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CATEGORIES: [&str; 4] = ["portraits", "dance", "engagement", "fashion"];

fn gallery_page(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
  <main>
    <div class="gallery-container">
      <div class="gallery-item">
        <img src="https://via.placeholder.com/600x800" alt="Placeholder">
      </div>
    </div>
  </main>
  <footer><div>© {title}</div></footer>
</body>
</html>
"#
    )
}

const ABOUT_PAGE: &str = r#"<section class="about">
  <img src="https://via.placeholder.com/400x500?text=Photographer" alt="Photographer">
</section>
"#;

fn touch_images(root: &Path, folder: &str, names: &[String]) {
    let dir = root.join("images").join(folder);
    fs::create_dir_all(&dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"jpeg").unwrap();
    }
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("img{:02}.jpg", i)).collect()
}

fn full_site() -> TempDir {
    let site = TempDir::new().unwrap();
    for category in CATEGORIES {
        touch_images(site.path(), category, &numbered(10));
        fs::write(site.path().join(format!("{}.html", category)), gallery_page(category)).unwrap();
    }
    touch_images(site.path(), "about", &["me.jpg".to_string()]);
    fs::write(site.path().join("about.html"), ABOUT_PAGE).unwrap();
    fs::write(site.path().join("index.html"), gallery_page("home")).unwrap();
    site
}

fn read(site: &TempDir, page: &str) -> String {
    fs::read_to_string(site.path().join(page)).unwrap()
}

#[test]
fn test_missing_images_dir_halts() {
    let site = TempDir::new().unwrap();
    fs::write(site.path().join("dance.html"), gallery_page("dance")).unwrap();

    let summary = run(&SiteConfig::default().with_root(site.path()));

    assert!(summary.halted);
    assert!(summary.pages.is_empty());
    assert_eq!(read(&site, "dance.html"), gallery_page("dance"));
}

#[test]
fn test_full_site_update() {
    let site = full_site();

    let summary = run(&SiteConfig::default().with_root(site.path()));

    assert!(!summary.halted);
    assert_eq!(summary.updated, 6);
    assert_eq!(summary.skipped, 0);

    let dance = read(&site, "dance.html");
    assert_eq!(dance.matches(r#"class="gallery-item""#).count(), 10);
    assert!(!dance.contains("via.placeholder.com"));
    assert!(dance.contains(r#"<img src="images/dance/img00.jpg" alt="Dance Photography">"#));
    assert!(dance.contains("  </main>\n  <footer><div>© dance</div></footer>"));

    let about = read(&site, "about.html");
    assert!(about.contains(r#"<img src="images/about/me.jpg" alt="Photographer">"#));

    // no overview folder: 8 from each of the 4 categories
    let index = read(&site, "index.html");
    assert_eq!(index.matches(r#"class="gallery-item""#).count(), 32);
    assert!(!index.contains("img08.jpg"));
    let portraits = index.find(r#"data-category="portraits""#).unwrap();
    let fashion = index.find(r#"data-category="fashion""#).unwrap();
    assert!(portraits < fashion);
}

#[test]
fn test_overview_folder_wins() {
    let site = full_site();
    touch_images(
        site.path(),
        "overview",
        &["c.jpg".to_string(), "a.jpg".to_string(), "b.png".to_string()],
    );

    run(&SiteConfig::default().with_root(site.path()));

    let index = read(&site, "index.html");
    assert_eq!(index.matches(r#"class="gallery-item""#).count(), 3);
    assert_eq!(index.matches(r#"data-category="overview""#).count(), 3);
    let a = index.find("images/overview/a.jpg").unwrap();
    let b = index.find("images/overview/b.png").unwrap();
    let c = index.find("images/overview/c.jpg").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_page_without_container_is_left_alone() {
    let site = full_site();
    let plain = "<html><body><p>coming soon</p></body></html>\n";
    fs::write(site.path().join("fashion.html"), plain).unwrap();

    let summary = run(&SiteConfig::default().with_root(site.path()));

    assert_eq!(read(&site, "fashion.html"), plain);
    assert_eq!(summary.skipped, 1);
    assert!(summary.warnings[0].contains("Could not find gallery container"));
    let outcome = summary.pages.iter().find(|p| p.page == "fashion.html").unwrap();
    assert!(!outcome.updated);
}

#[test]
fn test_missing_pages_and_folders_are_skipped() {
    let site = full_site();
    fs::remove_file(site.path().join("engagement.html")).unwrap();
    fs::remove_dir_all(site.path().join("images").join("portraits")).unwrap();
    fs::remove_dir_all(site.path().join("images").join("about")).unwrap();
    let portraits_before = read(&site, "portraits.html");

    let summary = run(&SiteConfig::default().with_root(site.path()));

    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.updated, 3);
    assert!(!site.path().join("engagement.html").exists());
    assert_eq!(read(&site, "portraits.html"), portraits_before);
    assert_eq!(read(&site, "about.html"), ABOUT_PAGE);
    // overview falls back to the remaining three categories
    assert_eq!(read(&site, "index.html").matches(r#"class="gallery-item""#).count(), 24);
}

#[test]
fn test_rerun_is_stable() {
    let site = full_site();
    let config = SiteConfig::default().with_root(site.path());

    run(&config);
    let first: Vec<String> = ["dance.html", "index.html", "about.html"]
        .iter()
        .map(|p| read(&site, p))
        .collect();

    let summary = run(&config);
    let second: Vec<String> = ["dance.html", "index.html", "about.html"]
        .iter()
        .map(|p| read(&site, p))
        .collect();

    assert_eq!(first, second);
    // about.html no longer has a placeholder
    assert_eq!(summary.skipped, 1);
}

#[test]
fn test_json_summary_serializes() {
    let site = full_site();

    let summary = run(&SiteConfig::default().with_root(site.path()));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["halted"], false);
    assert_eq!(json["updated"], 6);
    assert_eq!(json["pages"].as_array().unwrap().len(), 6);
}
