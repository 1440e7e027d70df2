//! Injected configuration: API base URL, navigation URLs, label tables per
//! language and the current user's identity. Loaded once from
//! `$XDG_CONFIG_HOME/dashtop/config.json` (every field optional) and handed to
//! each component; nothing reads it from a global.

use std::{collections::BTreeMap, fs, path::Path, path::PathBuf, sync::OnceLock};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_DAYS: u32 = 30;

/// (code, display name, flag)
pub const LANGUAGES: [(&str, &str, &str); 2] =
    [("tr", "Türkçe", "🇹🇷"), ("en", "English", "🇬🇧")];

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("dashtop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dashtop")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserIdentity {
    pub logged_in: bool,
    pub admin: bool,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self {
            logged_in: true,
            admin: true,
            username: Some("admin".into()),
            email: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavUrls {
    pub home: String,
    pub questions: String,
    pub leaderboard: String,
    pub about: String,
    pub admin: String,
    pub profile: String,
    pub settings: String,
    pub logout: String,
    pub login: String,
    pub register: String,
    pub dashboard: String,
    pub users: String,
    pub add_user: String,
    pub edit_user: String,
    pub programming_questions: String,
    pub new_programming_question: String,
    pub new_programming_question_ai: String,
    pub view_submissions: String,
    pub test_question: String,
    pub badges: String,
    pub new_badge: String,
    pub admin_settings: String,
}

impl Default for NavUrls {
    fn default() -> Self {
        Self {
            home: "/".into(),
            questions: "/questions".into(),
            leaderboard: "/leaderboard".into(),
            about: "/about".into(),
            admin: "/admin".into(),
            profile: "/profil".into(),
            settings: "/settings".into(),
            logout: "/logout".into(),
            login: "/login".into(),
            register: "/register".into(),
            dashboard: "/admin/".into(),
            users: "/admin/users".into(),
            add_user: "/admin/users/new".into(),
            edit_user: "/admin/users".into(),
            programming_questions: "/admin/programming-questions".into(),
            new_programming_question: "/admin/programming-questions/new".into(),
            new_programming_question_ai: "/admin/programming-questions/new_ai".into(),
            view_submissions: "/admin/programming-questions".into(),
            test_question: "/admin/programming-questions".into(),
            badges: "/admin/badges".into(),
            new_badge: "/admin/badges/new".into(),
            admin_settings: "/admin/settings".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    // header
    pub app_name: String,
    pub tagline: String,
    pub home: String,
    pub questions: String,
    pub leaderboard: String,
    pub about: String,
    pub admin_panel: String,
    pub profile: String,
    pub settings: String,
    pub logout: String,
    pub login: String,
    pub register: String,
    // sidebar
    pub dashboard: String,
    pub users: String,
    pub manage_users: String,
    pub add_user: String,
    pub edit_user: String,
    pub programming_questions: String,
    pub manage_questions: String,
    pub add_question: String,
    pub add_question_ai: String,
    pub view_submissions: String,
    pub test_questions: String,
    pub badges: String,
    pub manage_badges: String,
    pub add_badge: String,
    // footer
    pub all_rights: String,
    pub platform_desc: String,
    pub dark_mode: String,
    pub light_mode: String,
    // widgets
    pub server_status: String,
    pub recent_questions: String,
    pub recent_users: String,
    pub recent_submissions: String,
    pub activity_chart: String,
    pub activity_stats: String,
    pub last_days: String,
    pub loading: String,
    pub registrations: String,
    pub solved: String,
    // status panel
    pub gauge_cpu: String,
    pub gauge_ram: String,
    pub gauge_process_ram: String,
    pub in_use: String,
    pub total: String,
    pub runtime: String,
    pub framework: String,
    pub database: String,
    // tables
    pub col_question_title: String,
    pub col_difficulty: String,
    pub col_points: String,
    pub col_date: String,
    pub col_username: String,
    pub col_email: String,
    pub col_roles: String,
    pub col_user: String,
    pub col_question: String,
    pub col_result: String,
    pub col_time_ms: String,
    pub no_questions: String,
    pub no_users: String,
    pub no_submissions: String,
    pub easy: String,
    pub medium: String,
    pub hard: String,
    pub very_hard: String,
    pub unknown: String,
    pub passed: String,
    pub failed: String,
    // stat cards
    pub stat_new_users: String,
    pub stat_total_submissions: String,
    pub stat_correct: String,
    pub stat_active_users: String,
    pub stat_accuracy: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::english()
    }
}

impl Labels {
    pub fn english() -> Self {
        Self {
            app_name: "Python Playground".into(),
            tagline: "Learn Python the fun way".into(),
            home: "Home".into(),
            questions: "Questions".into(),
            leaderboard: "Leaderboard".into(),
            about: "About".into(),
            admin_panel: "Admin Panel".into(),
            profile: "Profile".into(),
            settings: "Settings".into(),
            logout: "Log Out".into(),
            login: "Log In".into(),
            register: "Register".into(),
            dashboard: "Dashboard".into(),
            users: "Users".into(),
            manage_users: "Manage Users".into(),
            add_user: "Add User".into(),
            edit_user: "Edit User".into(),
            programming_questions: "Programming Questions".into(),
            manage_questions: "Manage Questions".into(),
            add_question: "Add Question".into(),
            add_question_ai: "Add Question (AI)".into(),
            view_submissions: "View Submissions".into(),
            test_questions: "Test Questions".into(),
            badges: "Badges".into(),
            manage_badges: "Manage Badges".into(),
            add_badge: "Add Badge".into(),
            all_rights: "All Rights Reserved.".into(),
            platform_desc: "An educational and interactive platform.".into(),
            dark_mode: "Dark Mode".into(),
            light_mode: "Light Mode".into(),
            server_status: "Server Status".into(),
            recent_questions: "Recent Questions".into(),
            recent_users: "Recent Users".into(),
            recent_submissions: "Recent Submissions".into(),
            activity_chart: "Registrations & Solved Questions".into(),
            activity_stats: "Activity".into(),
            last_days: "Last {days} days".into(),
            loading: "Loading...".into(),
            registrations: "Registrations".into(),
            solved: "Solved".into(),
            gauge_cpu: "CPU".into(),
            gauge_ram: "RAM".into(),
            gauge_process_ram: "Process RAM".into(),
            in_use: "in use".into(),
            total: "Total".into(),
            runtime: "Python".into(),
            framework: "Flask".into(),
            database: "MySQL".into(),
            col_question_title: "Title".into(),
            col_difficulty: "Difficulty".into(),
            col_points: "Points".into(),
            col_date: "Date".into(),
            col_username: "Username".into(),
            col_email: "Email".into(),
            col_roles: "Roles".into(),
            col_user: "User".into(),
            col_question: "Question".into(),
            col_result: "Result".into(),
            col_time_ms: "Time (ms)".into(),
            no_questions: "No questions found.".into(),
            no_users: "No users found.".into(),
            no_submissions: "No submissions found.".into(),
            easy: "Easy".into(),
            medium: "Medium".into(),
            hard: "Hard".into(),
            very_hard: "Very Hard".into(),
            unknown: "Unknown".into(),
            passed: "Passed".into(),
            failed: "Failed".into(),
            stat_new_users: "New Users".into(),
            stat_total_submissions: "Total Submissions".into(),
            stat_correct: "Correct Answers".into(),
            stat_active_users: "Active Users".into(),
            stat_accuracy: "Accuracy".into(),
        }
    }

    pub fn turkish() -> Self {
        Self {
            app_name: "Python Playground".into(),
            tagline: "Python ile eğlenceli bir şekilde öğrenin".into(),
            home: "Ana Sayfa".into(),
            questions: "Sorular".into(),
            leaderboard: "Sıralama".into(),
            about: "Hakkında".into(),
            admin_panel: "Yönetim Paneli".into(),
            profile: "Profil".into(),
            settings: "Ayarlar".into(),
            logout: "Çıkış Yap".into(),
            login: "Giriş Yap".into(),
            register: "Kayıt Ol".into(),
            dashboard: "Dashboard".into(),
            users: "Kullanıcılar".into(),
            manage_users: "Kullanıcıları Yönet".into(),
            add_user: "Yeni Kullanıcı Ekle".into(),
            edit_user: "Kullanıcı Düzenle".into(),
            programming_questions: "Programlama Soruları".into(),
            manage_questions: "Soruları Yönet".into(),
            add_question: "Yeni Soru Ekle".into(),
            add_question_ai: "Yeni Soru Ekle (AI)".into(),
            view_submissions: "Çözümleri Görüntüle".into(),
            test_questions: "Soruları Test Et".into(),
            badges: "Rozetler".into(),
            manage_badges: "Rozetleri Yönet".into(),
            add_badge: "Yeni Rozet Ekle".into(),
            all_rights: "Tüm Hakları Saklıdır.".into(),
            platform_desc: "Eğitici ve etkileşimli bir platform.".into(),
            dark_mode: "Koyu Mod".into(),
            light_mode: "Açık Mod".into(),
            server_status: "Sunucu Durumu".into(),
            recent_questions: "Son Sorular".into(),
            recent_users: "Son Kullanıcılar".into(),
            recent_submissions: "Son Gönderimler".into(),
            activity_chart: "Kayıtlar ve Çözülen Sorular".into(),
            activity_stats: "Aktivite".into(),
            last_days: "Son {days} gün".into(),
            loading: "Veriler yükleniyor...".into(),
            registrations: "Kayıtlar".into(),
            solved: "Çözülen Sorular".into(),
            gauge_cpu: "CPU Kullanımı".into(),
            gauge_ram: "RAM Kullanımı".into(),
            gauge_process_ram: "Uygulama RAM".into(),
            in_use: "kullanımda".into(),
            total: "Toplam".into(),
            runtime: "Python".into(),
            framework: "Flask".into(),
            database: "MySQL".into(),
            col_question_title: "Soru Başlığı".into(),
            col_difficulty: "Zorluk".into(),
            col_points: "Puan".into(),
            col_date: "Tarih".into(),
            col_username: "Kullanıcı Adı".into(),
            col_email: "E-posta".into(),
            col_roles: "Roller".into(),
            col_user: "Kullanıcı".into(),
            col_question: "Soru".into(),
            col_result: "Sonuç".into(),
            col_time_ms: "Süre (ms)".into(),
            no_questions: "Soru bulunamadı.".into(),
            no_users: "Kullanıcı bulunamadı.".into(),
            no_submissions: "Gönderim bulunamadı.".into(),
            easy: "Kolay".into(),
            medium: "Orta".into(),
            hard: "Zor".into(),
            very_hard: "Çok Zor".into(),
            unknown: "Bilinmiyor".into(),
            passed: "Başarılı".into(),
            failed: "Başarısız".into(),
            stat_new_users: "Yeni Kullanıcı".into(),
            stat_total_submissions: "Toplam Gönderim".into(),
            stat_correct: "Doğru Cevap".into(),
            stat_active_users: "Aktif Kullanıcı".into(),
            stat_accuracy: "Doğruluk Oranı".into(),
        }
    }

    pub fn last_days(&self, days: u32) -> String {
        self.last_days.replace("{days}", &days.to_string())
    }
}

fn fallback_labels() -> &'static Labels {
    static EN: OnceLock<Labels> = OnceLock::new();
    EN.get_or_init(Labels::english)
}

fn default_labels() -> BTreeMap<String, Labels> {
    let mut m = BTreeMap::new();
    m.insert("en".to_string(), Labels::english());
    m.insert("tr".to_string(), Labels::turkish());
    m
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashConfig {
    pub base_url: String,
    pub lang: String,
    pub days: u32,
    pub user: UserIdentity,
    pub nav: NavUrls,
    pub labels: BTreeMap<String, Labels>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            lang: "tr".into(),
            days: DEFAULT_DAYS,
            user: UserIdentity::default(),
            nav: NavUrls::default(),
            labels: default_labels(),
        }
    }
}

impl DashConfig {
    /// Fills in built-in tables for languages the file left out.
    pub fn normalize(mut self) -> Self {
        for (code, labels) in default_labels() {
            self.labels.entry(code).or_insert(labels);
        }
        if self.days == 0 {
            self.days = DEFAULT_DAYS;
        }
        self
    }

    pub fn labels(&self) -> &Labels {
        self.labels
            .get(&self.lang)
            .or_else(|| self.labels.get("en"))
            .unwrap_or_else(|| fallback_labels())
    }

    pub fn set_lang(&mut self, code: &str) -> bool {
        if self.labels.contains_key(code) {
            self.lang = code.to_string();
            true
        } else {
            false
        }
    }
}

/// Missing file means defaults; a present but broken file is an error.
pub fn load_config(path: &Path) -> anyhow::Result<DashConfig> {
    match fs::read_to_string(path) {
        Ok(s) => {
            let cfg: DashConfig = serde_json::from_str(&s)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(cfg.normalize())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DashConfig::default()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}
