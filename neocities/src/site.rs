use crate::{
    api_client::{Api, ApiClient},
    error::Error,
    multipart::make_multipart_file,
    neo_time::NeoTime,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{
    borrow::Cow,
    env,
    fs::{self, File},
    io,
    path::{Component, MAIN_SEPARATOR, Path, PathBuf},
};
use tracing::{debug, info, warn};

/// A NeoCities site, used both to authenticate and to look up information.
///
/// Upload, delete and list calls need [`Site::key`]. Info lookups only
/// need [`Site::site_name`], and [`Site::info`] is only filled in by
/// [`Site::get_info`].
#[derive(Debug, Default)]
pub struct Site {
    pub site_name: String,
    pub key: Option<SecretString>,
    pub info: SiteInfo,
}

/// Public information about a site, as returned by the info endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteInfo {
    pub sitename: String,
    pub views: u64,
    pub hits: u64,
    pub created_at: Option<NeoTime>,
    pub last_updated: Option<NeoTime>,
    pub domain: Option<String>,
    pub tags: Vec<String>,
}

/// Fields of an info response. Anything absent or `null` leaves the
/// matching [`SiteInfo`] field untouched.
#[derive(Deserialize, Default)]
#[serde(default)]
struct SiteInfoUpdate {
    sitename: Option<String>,
    views: Option<u64>,
    hits: Option<u64>,
    created_at: Option<NeoTime>,
    last_updated: Option<NeoTime>,
    domain: Option<String>,
    tags: Option<Vec<String>>,
}

impl SiteInfoUpdate {
    fn apply(self, info: &mut SiteInfo) {
        if let Some(sitename) = self.sitename {
            info.sitename = sitename;
        }
        if let Some(views) = self.views {
            info.views = views;
        }
        if let Some(hits) = self.hits {
            info.hits = hits;
        }
        if self.created_at.is_some() {
            info.created_at = self.created_at;
        }
        if self.last_updated.is_some() {
            info.last_updated = self.last_updated;
        }
        if self.domain.is_some() {
            info.domain = self.domain;
        }
        if let Some(tags) = self.tags {
            info.tags = tags;
        }
    }
}

#[derive(Deserialize)]
struct InfoResponse {
    #[serde(default)]
    info: Option<SiteInfoUpdate>,
}

/// A file or directory stored on a site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteFile {
    pub path: String,
    #[serde(rename = "is_directory")]
    pub is_dir: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub updated_at: Option<NeoTime>,
    /// Content hash. Directories have none.
    #[serde(default, rename = "sha1_hash")]
    pub sha1: Option<String>,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    files: Vec<SiteFile>,
}

/// Outcome of [`Site::push`].
#[derive(Debug, Default)]
pub struct PushReport {
    /// Remote names of the files that were uploaded, in upload order.
    pub uploaded: Vec<String>,
    pub failed: Vec<PushFailure>,
}

impl PushReport {
    /// Whether every file found was uploaded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.uploaded.len() + self.failed.len()
    }
}

#[derive(Debug)]
pub struct PushFailure {
    pub name: String,
    pub error: Error,
}

impl Site {
    /// A site identified by name only, enough for [`Site::get_info`].
    pub fn named(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            ..Default::default()
        }
    }

    /// Set the API key used for authenticated calls.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(SecretString::from(key.into()));
        self
    }

    /// Whether the site holds a non-empty key.
    pub fn has_key(&self) -> bool {
        self.key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Use `client` if given, otherwise build one bound to `api`.
    ///
    /// Fails with [`Error::MissingKey`] before anything is sent when `api`
    /// needs a key and the resulting client does not carry one.
    fn resolve_client<'a>(
        &self,
        api: Api,
        client: Option<&'a ApiClient>,
    ) -> Result<Cow<'a, ApiClient>, Error> {
        let client = match client {
            Some(client) => Cow::Borrowed(client),
            None => match ApiClient::new(self, api) {
                Ok(client) => Cow::Owned(client),
                Err(missing) if !api.requires_key() => Cow::Owned(missing.into_client()),
                Err(missing) => return Err(missing.into()),
            },
        };
        if api.requires_key() && !client.is_authenticated() {
            return Err(Error::MissingKey);
        }
        Ok(client)
    }

    /// Upload a single file.
    ///
    /// When `name` is empty the file's base name is used as the remote
    /// name. A name containing slashes places the file in that directory
    /// on the site.
    pub fn upload_file(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        client: Option<&ApiClient>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let client = self.resolve_client(Api::Upload, client)?;
        if path.as_os_str().is_empty() {
            return Err(Error::MissingField("path"));
        }

        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let name = if name.is_empty() {
            base_name(path)
        } else {
            name.to_owned()
        };
        let (body, content_type) = make_multipart_file(file, &name).map_err(io_error)?;

        info!("uploading '{}' as '{name}'", path.display());
        client
            .request_for(Api::Upload)?
            .content_type(&content_type)
            .body(body)
            .send()?;
        Ok(())
    }

    /// Upload every file under `dir`, keeping the directory layout.
    ///
    /// Files are uploaded one at a time in walk order (depth-first, by file
    /// name). Each file's remote name is its path relative to the current
    /// directory, so `dir` must lie inside it; an absolute `dir` is
    /// accepted as long as it does. A file that fails to upload is logged
    /// and recorded in the report, and the push carries on. Only failing
    /// to read `dir` itself aborts the push.
    pub fn push(
        &self,
        dir: impl AsRef<Path>,
        client: Option<&ApiClient>,
    ) -> Result<PushReport, Error> {
        let dir = dir.as_ref();
        let client = self.resolve_client(Api::Upload, client)?;
        let walk_error = |source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        };

        let root = push_root(dir)?;
        let mut report = PushReport::default();
        if !fs::metadata(&root).map_err(walk_error)?.is_dir() {
            self.push_file(&root, &client, &mut report);
            return Ok(report);
        }
        for (path, is_dir) in read_dir_sorted(&root).map_err(walk_error)? {
            self.push_entry(&path, is_dir, &client, &mut report);
        }

        info!(
            "push of '{}' finished: {} uploaded, {} failed",
            dir.display(),
            report.uploaded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn push_entry(&self, path: &Path, is_dir: bool, client: &ApiClient, report: &mut PushReport) {
        if !is_dir {
            self.push_file(path, client, report);
            return;
        }
        match read_dir_sorted(path) {
            Ok(entries) => {
                for (path, is_dir) in entries {
                    self.push_entry(&path, is_dir, client, report);
                }
            }
            Err(source) => {
                let name = remote_name(path);
                warn!("skipping directory '{name}': {source}");
                report.failed.push(PushFailure {
                    name,
                    error: Error::Walk {
                        path: path.to_path_buf(),
                        source,
                    },
                });
            }
        }
    }

    fn push_file(&self, path: &Path, client: &ApiClient, report: &mut PushReport) {
        let name = remote_name(path);
        match self.upload_file(path, &name, Some(client)) {
            Ok(()) => report.uploaded.push(name),
            Err(error) => {
                warn!("failed to upload '{name}': {error}");
                report.failed.push(PushFailure { name, error });
            }
        }
    }

    /// Delete files from the site in a single request.
    ///
    /// An empty `files` still sends the request and leaves it to the API
    /// to answer.
    pub fn delete_files<S: AsRef<str>>(
        &self,
        client: Option<&ApiClient>,
        files: &[S],
    ) -> Result<(), Error> {
        let client = self.resolve_client(Api::Delete, client)?;
        let form = files
            .iter()
            .map(|file| ("filenames[]", file.as_ref()))
            .collect::<Vec<_>>();

        info!("deleting {} file(s)", form.len());
        debug!(
            "deleting {:?}",
            form.iter().map(|(_, file)| *file).collect::<Vec<_>>()
        );
        client.request_for(Api::Delete)?.form(&form).send()?;
        Ok(())
    }

    /// Fetch public information about the site into [`Site::info`].
    ///
    /// Needs [`Site::site_name`] but no key. Fields missing from the
    /// response keep their previous values.
    pub fn get_info(&mut self, client: Option<&ApiClient>) -> Result<&mut Self, Error> {
        if self.site_name.is_empty() {
            return Err(Error::MissingField("site_name"));
        }
        let client = self.resolve_client(Api::Info, client)?;

        debug!("fetching info for site '{}'", self.site_name);
        let response: InfoResponse = client
            .request_for(Api::Info)?
            .query(&[("sitename", self.site_name.as_str())])
            .send_json()?;
        if let Some(update) = response.info {
            update.apply(&mut self.info);
        }
        Ok(self)
    }

    /// List the files on the site under `path`, in the order the API
    /// returns them. An empty `path` lists the whole site.
    pub fn list(&self, path: &str, client: Option<&ApiClient>) -> Result<Vec<SiteFile>, Error> {
        let client = self.resolve_client(Api::List, client)?;

        let mut request = client.request_for(Api::List)?;
        if !path.is_empty() {
            request = request.query(&[("path", path)]);
        }
        let response: ListResponse = request.send_json()?;
        debug!("listed {} file(s) under '{path}'", response.files.len());
        Ok(response.files)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// `dir` relative to the current directory.
///
/// Relative paths are taken as they are unless they climb out with `..`.
/// Absolute paths are resolved and must point inside the current directory.
fn push_root(dir: &Path) -> Result<PathBuf, Error> {
    let outside = || Error::OutsideWorkingDir {
        path: dir.to_path_buf(),
    };
    if dir.is_relative() {
        if dir.components().any(|part| part == Component::ParentDir) {
            return Err(outside());
        }
        return Ok(dir.to_path_buf());
    }

    let walk_error = |source| Error::Walk {
        path: dir.to_path_buf(),
        source,
    };
    let cwd = env::current_dir()
        .and_then(fs::canonicalize)
        .map_err(walk_error)?;
    let root = fs::canonicalize(dir).map_err(walk_error)?;
    match root.strip_prefix(&cwd) {
        Ok(relative) if relative.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Ok(relative) => Ok(relative.to_path_buf()),
        Err(_) => Err(outside()),
    }
}

/// Name a walked path is uploaded under: forward slashes, no leading `./`.
fn remote_name(path: &Path) -> String {
    let name = path.to_string_lossy().replace(MAIN_SEPARATOR, "/");
    match name.strip_prefix("./") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}

/// Entries of `dir` with whether each is a directory, sorted by file name.
/// Symlinks are not followed.
fn read_dir_sorted(dir: &Path) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| {
            let entry = entry?;
            Ok((entry.path(), entry.file_type()?.is_dir()))
        })
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
