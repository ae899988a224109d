//! Default content written to an empty local store.

use chrono::{DateTime, Utc};

use crate::models::{Category, PortfolioSettings, Project, ProjectStatus};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Owner profile used until real settings are saved.
pub fn default_settings() -> PortfolioSettings {
    PortfolioSettings {
        name: "Faqih Ardian Syah".to_string(),
        title: "TKJ Student & Aspiring Network Engineer".to_string(),
        bio: "Grade 11 vocational high school student majoring in Computer Network \
              Engineering (TKJ). Passionate about networking, web development, and creating \
              beautiful digital experiences with clean, minimalist design."
            .to_string(),
        email: "faqih.ardian@example.com".to_string(),
        phone: Some("+62 8xx xxxx xxxx".to_string()),
        location: Some("Indonesia".to_string()),
        github: Some("https://github.com/naidra".to_string()),
        linkedin: Some("https://linkedin.com/in/naidra".to_string()),
        twitter: Some("https://twitter.com/naidra".to_string()),
        website: Some("https://naidra-portfolio.com".to_string()),
        profile_image: None,
        resume_url: None,
        greetings: None,
        about_description: None,
        skills: None,
        social_links: None,
    }
}

/// The four sample projects, stamped with `now`.
pub fn sample_projects(now: DateTime<Utc>) -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "Network Topology Simulator".to_string(),
            description: "Interactive network topology design and simulation tool".to_string(),
            long_description: Some(
                "Developed a network topology simulator using Cisco Packet Tracer and GNS3. \
                 Implemented LAN/WAN configurations, routing protocols (RIP, OSPF), and VLANs \
                 for practical network design learning."
                    .to_string(),
            ),
            category: Category::Other,
            tags: strings(&["Cisco", "Packet Tracer", "GNS3", "Networking", "VLAN", "Routing"]),
            image: "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=800&h=600&fit=crop"
                .to_string(),
            images: None,
            live_demo_url: None,
            github_url: Some("https://github.com/naidra/network-topology".to_string()),
            featured: true,
            status: ProjectStatus::Completed,
            completed_date: Some("2024-12-15".to_string()),
            created_at: now,
            updated_at: now,
        },
        Project {
            id: "2".to_string(),
            title: "School Website Redesign".to_string(),
            description: "Modern responsive website for SMK with clean design".to_string(),
            long_description: Some(
                "Redesigned school website using HTML, CSS, JavaScript, and Bootstrap. Features \
                 include announcements, gallery, student portal, and mobile-responsive design \
                 for better accessibility."
                    .to_string(),
            ),
            category: Category::WebDevelopment,
            tags: strings(&["HTML", "CSS", "JavaScript", "Bootstrap", "Responsive Design"]),
            image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&h=600&fit=crop"
                .to_string(),
            images: None,
            live_demo_url: Some("https://example.com".to_string()),
            github_url: Some("https://github.com/naidra/school-website".to_string()),
            featured: true,
            status: ProjectStatus::Completed,
            completed_date: Some("2024-11-20".to_string()),
            created_at: now,
            updated_at: now,
        },
        Project {
            id: "3".to_string(),
            title: "Linux Server Configuration".to_string(),
            description: "Web & DNS server setup using Ubuntu Server".to_string(),
            long_description: Some(
                "Configured Ubuntu Server with Apache, MySQL, PHP (LAMP stack), DNS server \
                 (BIND9), and implemented security measures including firewall rules and SSH \
                 key authentication."
                    .to_string(),
            ),
            category: Category::Other,
            tags: strings(&[
                "Linux",
                "Ubuntu Server",
                "Apache",
                "MySQL",
                "DNS",
                "BIND9",
                "Security",
            ]),
            image: "https://images.unsplash.com/photo-1629654297299-c8506221ca97?w=800&h=600&fit=crop"
                .to_string(),
            images: None,
            live_demo_url: None,
            github_url: None,
            featured: false,
            status: ProjectStatus::Completed,
            completed_date: Some("2024-10-30".to_string()),
            created_at: now,
            updated_at: now,
        },
        Project {
            id: "4".to_string(),
            title: "Network Monitoring Dashboard".to_string(),
            description: "Real-time network monitoring with bandwidth tracking".to_string(),
            long_description: Some(
                "Built a network monitoring dashboard using Python and web technologies. Tracks \
                 bandwidth usage, device connectivity, and network performance metrics in \
                 real-time with visual graphs."
                    .to_string(),
            ),
            category: Category::WebDevelopment,
            tags: strings(&[
                "Python",
                "JavaScript",
                "Chart.js",
                "Network Monitoring",
                "Real-time",
            ]),
            image: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=800&h=600&fit=crop"
                .to_string(),
            images: None,
            live_demo_url: None,
            github_url: Some("https://github.com/naidra/network-monitor".to_string()),
            featured: false,
            status: ProjectStatus::InProgress,
            completed_date: None,
            created_at: now,
            updated_at: now,
        },
    ]
}
