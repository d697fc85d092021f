pub const HTML: &str = r#"<nav class="{css_class}-nav"
     [class.horizontal]="orientation === 'horizontal'"
     [class.vertical]="orientation === 'vertical'">
  <ul class="nav-list">
    <li class="nav-item" *ngFor="let item of navigationItems">
      <a class="nav-link"
         [routerLink]="item.route"
         routerLinkActive="active">
        <mat-icon *ngIf="item.icon" class="nav-icon">{{ item.icon }}</mat-icon>
        <span class="nav-text">{{ item.label }}</span>
      </a>
    </li>
  </ul>
</nav>
"#;

pub const SCSS: &str = r#".{css_class}-nav {
  width: 100%;

  .nav-list {
    display: flex;
    list-style: none;
    margin: 0;
    padding: 0;
  }

  &.vertical .nav-list {
    flex-direction: column;
  }

  .nav-link {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.75rem 1rem;
    color: #666;
    text-decoration: none;
    border-radius: 6px;
    transition: all 0.2s ease;

    &:hover {
      background: #f8f9fa;
      color: #333;
    }

    &.active {
      background: #007bff;
      color: white;
    }

    .nav-icon {
      font-size: 1rem;
      width: 1rem;
      height: 1rem;
    }
  }
}
"#;

pub const TS: &str = r#"import { Component, Input } from '@angular/core';

export interface NavigationItem {
  label: string;
  route: string;
  icon?: string;
}

@Component({
  selector: '{selector}',
  templateUrl: './{css_class}.component.html',
  styleUrls: ['./{css_class}.component.scss']
})
export class {class_name} {
  @Input() navigationItems: NavigationItem[] = [
    { label: 'Home', route: '/home', icon: 'home' },
    { label: 'About', route: '/about', icon: 'info' },
    { label: 'Contact', route: '/contact', icon: 'contact_support' }
  ];
  @Input() orientation: 'horizontal' | 'vertical' = 'horizontal';
}
"#;
